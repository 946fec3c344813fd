//! Caller-side transposition offset.
//!
//! The composition functions accept any `i32` and fold it modulo 12. This
//! type is for callers that want to validate user input against the
//! supported range of one octave either way before composing.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported shift in either direction
pub const MAX_SEMITONES: i32 = 11;

/// A validated semitone offset in `-11..=11`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Transposition(i32);

impl Transposition {
    /// No transposition
    pub const NONE: Self = Self(0);

    /// # Errors
    ///
    /// Returns [`CoreError::TransposeOutOfRange`] if `semitones` is outside `-11..=11`.
    pub fn new(semitones: i32) -> Result<Self> {
        if semitones < -MAX_SEMITONES || semitones > MAX_SEMITONES {
            return Err(CoreError::TransposeOutOfRange { semitones });
        }
        Ok(Self(semitones))
    }

    #[must_use]
    pub const fn semitones(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Human-readable description such as `"2 semitones up"`, or `None` when not transposed
    #[must_use]
    pub fn label(self) -> Option<String> {
        transposition_label(self.0)
    }
}

/// Describe a semitone shift for display, `None` for zero
#[must_use]
pub fn transposition_label(semitones: i32) -> Option<String> {
    if semitones == 0 {
        return None;
    }
    let direction = if semitones > 0 { "up" } else { "down" };
    let amount = semitones.unsigned_abs();
    let unit = if amount == 1 { "semitone" } else { "semitones" };
    Some(format!("{amount} {unit} {direction}"))
}

impl TryFrom<i32> for Transposition {
    type Error = CoreError;

    fn try_from(semitones: i32) -> Result<Self> {
        Self::new(semitones)
    }
}

impl From<Transposition> for i32 {
    fn from(t: Transposition) -> Self {
        t.0
    }
}

impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(Transposition::new(-11).is_ok());
        assert!(Transposition::new(11).is_ok());
        assert!(Transposition::new(0).is_ok());
        assert!(matches!(
            Transposition::new(12),
            Err(CoreError::TransposeOutOfRange { semitones: 12 })
        ));
        assert!(Transposition::new(-12).is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Transposition::NONE.label(), None);
        assert_eq!(
            Transposition::new(2).unwrap().label().as_deref(),
            Some("2 semitones up")
        );
        assert_eq!(
            Transposition::new(-1).unwrap().label().as_deref(),
            Some("1 semitone down")
        );
    }

    #[test]
    fn test_display_sign() {
        assert_eq!(Transposition::new(3).unwrap().to_string(), "+3");
        assert_eq!(Transposition::new(-3).unwrap().to_string(), "-3");
        assert_eq!(Transposition::NONE.to_string(), "+0");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Transposition = serde_json::from_str("-5").unwrap();
        assert_eq!(ok.semitones(), -5);
        assert!(serde_json::from_str::<Transposition>("15").is_err());
    }
}
