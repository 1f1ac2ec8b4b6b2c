//! HTTP adapters for the chat endpoints
//!
//! Exposes the dialogue engine over a stateless REST API: every request
//! carries the full conversation so far.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::ChatAppState;
pub use routes::routes;
