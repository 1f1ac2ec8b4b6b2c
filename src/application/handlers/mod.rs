//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod chat;

pub use chat::{
    ChatCommand, ChatError, ChatHandler, ChatResult, CycleOutcome, DialogueEngine, DialogueError,
};
