//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `OpenAIProvider` - OpenAI chat completions (gpt-4o by default)
//! - `MockAIProvider` - Scripted responses for tests

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_CONTENT};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
