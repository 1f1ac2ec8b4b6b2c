//! Question gate: how many questions must be answered before a pick.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// What the engine is allowed to do for a given number of answered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    /// Too few answers. Only questions go out; any pick is discarded.
    Gathering,
    /// The model may recommend but does not have to.
    MayRecommend,
    /// The model must recommend; a missing pick triggers a forced call.
    ForceRecommend,
}

impl GatePhase {
    pub fn allows_recommendation(&self) -> bool {
        !matches!(self, GatePhase::Gathering)
    }
}

/// Maps a user turn count to a [`GatePhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGate {
    min_questions: usize,
    force_after: usize,
}

impl QuestionGate {
    pub const DEFAULT_MIN_QUESTIONS: usize = 4;
    pub const DEFAULT_FORCE_AFTER: usize = 5;

    /// Requires `1 <= min_questions <= force_after`.
    pub fn new(min_questions: usize, force_after: usize) -> Result<Self, ValidationError> {
        if min_questions == 0 {
            return Err(ValidationError::out_of_range(
                "min_questions",
                1,
                i64::MAX,
                0,
            ));
        }
        if force_after < min_questions {
            return Err(ValidationError::out_of_range(
                "force_after",
                min_questions as i64,
                i64::MAX,
                force_after as i64,
            ));
        }
        Ok(Self {
            min_questions,
            force_after,
        })
    }

    pub fn min_questions(&self) -> usize {
        self.min_questions
    }

    pub fn force_after(&self) -> usize {
        self.force_after
    }

    pub fn phase(&self, user_turn_count: usize) -> GatePhase {
        if user_turn_count < self.min_questions {
            GatePhase::Gathering
        } else if user_turn_count < self.force_after {
            GatePhase::MayRecommend
        } else {
            GatePhase::ForceRecommend
        }
    }
}

impl Default for QuestionGate {
    fn default() -> Self {
        Self {
            min_questions: Self::DEFAULT_MIN_QUESTIONS,
            force_after: Self::DEFAULT_FORCE_AFTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_phases() {
        let gate = QuestionGate::default();
        for count in 0..4 {
            assert_eq!(gate.phase(count), GatePhase::Gathering);
        }
        assert_eq!(gate.phase(4), GatePhase::MayRecommend);
        assert_eq!(gate.phase(5), GatePhase::ForceRecommend);
        assert_eq!(gate.phase(12), GatePhase::ForceRecommend);
    }

    #[test]
    fn equal_bounds_skip_may_recommend() {
        let gate = QuestionGate::new(5, 5).unwrap();
        assert_eq!(gate.phase(4), GatePhase::Gathering);
        assert_eq!(gate.phase(5), GatePhase::ForceRecommend);
    }

    #[test]
    fn rejects_zero_minimum() {
        assert!(matches!(
            QuestionGate::new(0, 5),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_force_before_minimum() {
        let err = QuestionGate::new(5, 4).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("force_after", 5, i64::MAX, 4));
    }

    #[test]
    fn only_gathering_forbids_recommendation() {
        assert!(!GatePhase::Gathering.allows_recommendation());
        assert!(GatePhase::MayRecommend.allows_recommendation());
        assert!(GatePhase::ForceRecommend.allows_recommendation());
    }
}
