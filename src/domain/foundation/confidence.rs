//! Confidence value object for recommendations (1 to 10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How sure the recommender is about a pick: 1 (guess) to 10 (certain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a Confidence from an integer, returning error if out of range.
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::out_of_range(
                "confidence",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ))
        }
    }

    /// Creates a Confidence, pulling out-of-range values to the nearest bound.
    ///
    /// Used when reading generated text, where "CONFIDENCE: 12" is a
    /// formatting slip rather than a reason to drop the recommendation.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_i64(value)
    }
}

impl From<Confidence> for u8 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_accepts_the_full_scale() {
        for value in 1..=10 {
            assert_eq!(Confidence::try_from_i64(value).unwrap().value() as i64, value);
        }
    }

    #[test]
    fn confidence_rejects_values_outside_scale() {
        assert!(Confidence::try_from_i64(0).is_err());
        assert!(Confidence::try_from_i64(11).is_err());
        assert!(Confidence::try_from_i64(-3).is_err());
    }

    #[test]
    fn clamped_pulls_to_nearest_bound() {
        assert_eq!(Confidence::clamped(0).value(), 1);
        assert_eq!(Confidence::clamped(42).value(), 10);
        assert_eq!(Confidence::clamped(7).value(), 7);
    }

    #[test]
    fn confidence_serializes_as_integer() {
        let json = serde_json::to_string(&Confidence::clamped(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn confidence_deserialization_is_validated() {
        let ok: Confidence = serde_json::from_str("8").unwrap();
        assert_eq!(ok.value(), 8);
        assert!(serde_json::from_str::<Confidence>("11").is_err());
    }
}
