//! Tunable dialogue policy.

use crate::domain::foundation::{Confidence, ValidationError};

use super::fallback::{default_rules, FallbackSelector};
use super::gate::QuestionGate;
use super::prompt::PromptBuilder;
use super::validator::OutputValidator;

/// Policy parameters injected into the engine at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialoguePolicy {
    pub min_questions: usize,
    pub force_after: usize,
    /// Narrow the allow list to the UI-filtered menu, not just the prompt.
    pub filter_affects_allow_list: bool,
    /// Maximum edit distance accepted by fuzzy resolution.
    pub fuzzy_threshold: usize,
    /// List allowed names verbatim in every prompt.
    pub enumerate_allowed_names: bool,
    pub fallback_default: String,
    pub fallback_confidence: Confidence,
}

impl DialoguePolicy {
    pub fn gate(&self) -> Result<QuestionGate, ValidationError> {
        QuestionGate::new(self.min_questions, self.force_after)
    }

    pub fn prompt_builder(&self) -> PromptBuilder {
        PromptBuilder::new(self.min_questions, self.enumerate_allowed_names)
    }

    pub fn validator(&self) -> OutputValidator {
        OutputValidator::new(self.fuzzy_threshold)
    }

    pub fn fallback_selector(&self) -> FallbackSelector {
        FallbackSelector::new(
            default_rules(),
            self.fallback_default.clone(),
            self.fallback_confidence,
        )
    }
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self {
            min_questions: QuestionGate::DEFAULT_MIN_QUESTIONS,
            force_after: QuestionGate::DEFAULT_FORCE_AFTER,
            filter_affects_allow_list: false,
            fuzzy_threshold: 3,
            enumerate_allowed_names: true,
            fallback_default: "Latte".to_string(),
            fallback_confidence: Confidence::clamped(5),
        }
    }
}
