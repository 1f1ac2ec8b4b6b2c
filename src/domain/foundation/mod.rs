//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Cafekase domain.

mod confidence;
mod errors;
mod ids;
mod state_machine;

pub use confidence::Confidence;
pub use errors::ValidationError;
pub use ids::CycleId;
pub use state_machine::StateMachine;
