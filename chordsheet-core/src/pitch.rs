//! The 12-tone pitch-class circle and how it is spelled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 12 equal-tempered pitch classes, independent of octave.
///
/// Arithmetic is modulo 12. The canonical name of each value uses sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// How a pitch class is written when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

impl PitchClass {
    /// All pitch classes in ascending semitone order starting from C
    pub const ALL: [Self; 12] = [
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::A,
        Self::ASharp,
        Self::B,
    ];

    /// Semitone index of this pitch class, C = 0
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at the given semitone index, folded modulo 12
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Look up a root spelling such as `"C#"` or `"Bb"`.
    ///
    /// Flat spellings map onto their sharp equivalents, so `"Db"` and `"C#"`
    /// yield the same value. Only the 12 sharp names and the five flat names
    /// of the black keys are recognized.
    #[must_use]
    pub fn from_spelling(name: &str) -> Option<Self> {
        SHARP_NAMES
            .iter()
            .position(|n| *n == name)
            .or_else(|| {
                FLAT_NAMES
                    .iter()
                    .position(|n| *n == name && n.len() == 2)
            })
            .map(Self::from_index)
    }

    /// Shift by any number of semitones, up or down
    #[must_use]
    pub fn transpose(self, semitones: i32) -> Self {
        // rem_euclid(12) is always within 0..12
        let offset = usize::try_from(semitones.rem_euclid(12)).unwrap_or_default();
        Self::from_index(self.index() + offset)
    }

    /// Name of this pitch class under the given spelling
    #[must_use]
    pub const fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self.index()],
            Spelling::Flats => FLAT_NAMES[self.index()],
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}
