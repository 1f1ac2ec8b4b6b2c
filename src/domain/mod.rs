//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - The closed world of drinks, allow list, aliases and UI filter
//! - `dialogue` - Question gate, prompts, output validation, repair and fallback

pub mod catalog;
pub mod dialogue;
pub mod foundation;
