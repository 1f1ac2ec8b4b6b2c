//! State machine trait for stage enums.
//!
//! Gives every lifecycle enum (currently the dialogue cycle stages) one
//! validated way to move between states.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for CycleStage {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         self.valid_transitions().contains(target)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Validating => vec![Done, Repairing],
///             Done => vec![],
///             // ...
///         }
///     }
/// }
///
/// let next = stage.transition_to(CycleStage::Repairing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Brew {
        Ground,
        Steeping,
        Poured,
    }

    impl StateMachine for Brew {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Brew::Ground => vec![Brew::Steeping],
                Brew::Steeping => vec![Brew::Poured],
                Brew::Poured => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Brew::Ground.transition_to(Brew::Steeping), Ok(Brew::Steeping));
    }

    #[test]
    fn transition_to_fails_when_skipping_a_stage() {
        let err = Brew::Ground.transition_to(Brew::Poured).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Ground to Poured"));
    }

    #[test]
    fn only_the_last_stage_is_terminal() {
        assert!(!Brew::Ground.is_terminal());
        assert!(!Brew::Steeping.is_terminal());
        assert!(Brew::Poured.is_terminal());
    }
}
