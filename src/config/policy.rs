//! Dialogue policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialogue::{DialoguePolicy, QuestionGate};
use crate::domain::foundation::Confidence;

/// Tunables for the question gate, validator and fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_min_questions")]
    pub min_questions: usize,

    #[serde(default = "default_force_after")]
    pub force_after: usize,

    #[serde(default)]
    pub filter_affects_allow_list: bool,

    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: usize,

    #[serde(default = "default_true")]
    pub enumerate_allowed_names: bool,

    #[serde(default = "default_fallback_default")]
    pub fallback_default: String,

    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: u8,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_questions == 0 || self.force_after < self.min_questions {
            return Err(ValidationError::InvalidQuestionThresholds {
                min: self.min_questions,
                force: self.force_after,
            });
        }
        if !(1..=10).contains(&self.fallback_confidence) {
            return Err(ValidationError::InvalidFallbackConfidence(self.fallback_confidence));
        }
        if self.fallback_default.trim().is_empty() {
            return Err(ValidationError::EmptyFallbackDefault);
        }
        Ok(())
    }

    /// Converts into the domain policy.
    pub fn to_policy(&self) -> Result<DialoguePolicy, ValidationError> {
        self.validate()?;
        let confidence = Confidence::try_from_i64(i64::from(self.fallback_confidence))
            .map_err(|_| ValidationError::InvalidFallbackConfidence(self.fallback_confidence))?;

        Ok(DialoguePolicy {
            min_questions: self.min_questions,
            force_after: self.force_after,
            filter_affects_allow_list: self.filter_affects_allow_list,
            fuzzy_threshold: self.fuzzy_threshold,
            enumerate_allowed_names: self.enumerate_allowed_names,
            fallback_default: self.fallback_default.trim().to_string(),
            fallback_confidence: confidence,
        })
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_questions: default_min_questions(),
            force_after: default_force_after(),
            filter_affects_allow_list: false,
            fuzzy_threshold: default_fuzzy_threshold(),
            enumerate_allowed_names: true,
            fallback_default: default_fallback_default(),
            fallback_confidence: default_fallback_confidence(),
        }
    }
}

fn default_min_questions() -> usize {
    QuestionGate::DEFAULT_MIN_QUESTIONS
}

fn default_force_after() -> usize {
    QuestionGate::DEFAULT_FORCE_AFTER
}

fn default_fuzzy_threshold() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_fallback_default() -> String {
    "Latte".to_string()
}

fn default_fallback_confidence() -> u8 {
    5
}
