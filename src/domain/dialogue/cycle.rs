//! Stages of one dialogue cycle.
//!
//! ```text
//! Gathering ──────────────────────────────────────────────► Done
//!     │ (pick emitted)         (no pick, force phase)
//!     ▼                              │
//! Validating ◄──── ForceRecommend ◄──┘
//!     │ valid ──────────────────────────────────────────────► Done
//!     ▼ invalid
//! Repairing ──► Revalidating ── valid ──────────────────────► Done
//!                    │ invalid
//!                    ▼
//!                 Fallback ─────────────────────────────────► Done
//! ```
//!
//! There is no edge back into `Repairing`, so at most one repair call happens.

use serde::Serialize;

use super::validator::ResolvedBy;
use crate::domain::foundation::{StateMachine, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStage {
    Gathering,
    ForceRecommend,
    Validating,
    Repairing,
    Revalidating,
    Fallback,
    Done,
}

impl StateMachine for CycleStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CycleStage::*;
        match self {
            Gathering => vec![Done, Validating, ForceRecommend],
            ForceRecommend => vec![Validating],
            Validating => vec![Done, Repairing],
            Repairing => vec![Revalidating],
            Revalidating => vec![Done, Fallback],
            Fallback => vec![Done],
            Done => vec![],
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, CycleStage::Done)
    }
}

/// How a cycle reached `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CyclePath {
    /// The reply is a question.
    Question,
    /// The first validated pick was accepted.
    Accepted { via: ResolvedBy },
    /// The repaired pick was accepted.
    Repaired { via: ResolvedBy },
    /// Both picks failed; the fallback selector chose.
    Fallback,
}

impl CyclePath {
    pub fn is_recommendation(&self) -> bool {
        !matches!(self, CyclePath::Question)
    }
}

/// Records the stages a cycle walks through, rejecting illegal moves.
#[derive(Debug, Clone)]
pub struct StageTracker {
    current: CycleStage,
    visited: Vec<CycleStage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: CycleStage::Gathering,
            visited: vec![CycleStage::Gathering],
        }
    }

    pub fn current(&self) -> CycleStage {
        self.current
    }

    pub fn advance(&mut self, next: CycleStage) -> Result<CycleStage, ValidationError> {
        self.current = self.current.transition_to(next)?;
        self.visited.push(self.current);
        Ok(self.current)
    }

    pub fn into_visited(self) -> Vec<CycleStage> {
        self.visited
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
