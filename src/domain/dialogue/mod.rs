//! Dialogue domain module.
//!
//! Pure pieces of one recommendation cycle: turns, the question gate, prompt
//! construction, the output grammar, validation against the allow list, the
//! fallback selector and the cycle state machine. Nothing here performs I/O;
//! the engine that drives a collaborator lives in the application layer.

mod cycle;
mod fallback;
mod gate;
mod grammar;
mod levenshtein;
mod policy;
mod prompt;
mod turn;
mod validator;

pub use cycle::{CyclePath, CycleStage, StageTracker};
pub use fallback::{default_rules, FallbackRule, FallbackSelector, FALLBACK_WHY};
pub use gate::{GatePhase, QuestionGate};
pub use grammar::{
    find_drink_line, has_drink_line, rewrite_drink_line, strip_grammar_lines, DrinkLine,
    Recommendation,
};
pub use levenshtein::levenshtein;
pub use policy::DialoguePolicy;
pub use prompt::{next_unasked_question, PromptBuilder, PromptMode, FORCED_NUDGE, QUESTION_POOL};
pub use turn::{Conversation, Turn, TurnRole};
pub use validator::{AcceptedOutput, OutputValidator, Resolution, ResolvedBy, Validation};
