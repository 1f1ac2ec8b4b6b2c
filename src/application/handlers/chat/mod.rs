//! Chat handlers: the dialogue engine and the command that drives it.

mod dialogue_engine;
mod send_chat;

pub use dialogue_engine::{CycleOutcome, DialogueEngine, DialogueError};
pub use send_chat::{ChatCommand, ChatError, ChatHandler, ChatResult};
