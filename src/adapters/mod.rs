//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - LLM collaborator implementations (OpenAI, mock)
//! - `catalog` - Catalog sources (file, static)
//! - `http` - REST transport

pub mod ai;
pub mod catalog;
pub mod http;

pub use ai::{MockAIProvider, MockError, OpenAIConfig, OpenAIProvider};
pub use catalog::{FileCatalogSource, StaticCatalogSource};
pub use http::{app_router, ChatAppState};
