//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - the text-completion collaborator
//! - `CatalogSource` - where catalog items are loaded from

mod ai_provider;
mod catalog_source;

pub use ai_provider::{
    AIError, AIProvider, CallKind, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use catalog_source::CatalogSource;
