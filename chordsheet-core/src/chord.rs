//! Chord symbol parsing and transposition.

use crate::error::{CoreError, Result};
use crate::pitch::{PitchClass, Spelling};
use std::fmt;
use std::str::FromStr;

/// A chord root plus an opaque quality/extension suffix.
///
/// The suffix (`"m7"`, `"sus4"`, `"/G"`, ...) is never interpreted; it is
/// carried verbatim through transposition. Transposing produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChordSymbol {
    root: PitchClass,
    suffix: String,
}

impl ChordSymbol {
    /// Create a chord symbol from a root and suffix
    pub fn new(root: PitchClass, suffix: impl Into<String>) -> Self {
        Self {
            root,
            suffix: suffix.into(),
        }
    }

    /// Parse a chord token such as `"Bbmaj7"` into root `A#` and suffix `"maj7"`.
    ///
    /// The root is the first character, extended by one when the second
    /// character is `#` or a lowercase `b`. Flat roots are stored as their
    /// sharp equivalents.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnrecognizedRoot`] if the leading characters are not
    /// one of the recognized pitch-class spellings.
    pub fn parse(token: &str) -> Result<Self> {
        let (root, suffix) = split_root(token).ok_or_else(|| CoreError::UnrecognizedRoot {
            token: token.to_string(),
        })?;
        Ok(Self::new(root, suffix))
    }

    #[must_use]
    pub const fn root(&self) -> PitchClass {
        self.root
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Shift the root by `semitones` (any integer, folded modulo 12), keeping the suffix
    #[must_use]
    pub fn transpose(&self, semitones: i32) -> Self {
        Self {
            root: self.root.transpose(semitones),
            suffix: self.suffix.clone(),
        }
    }

    /// Root name under `spelling` followed by the suffix
    #[must_use]
    pub fn render(&self, spelling: Spelling) -> String {
        let mut out = String::with_capacity(2 + self.suffix.len());
        out.push_str(self.root.name(spelling));
        out.push_str(&self.suffix);
        out
    }
}

impl FromStr for ChordSymbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)
    }
}

/// A raw chord token after parsing at the input boundary.
///
/// Tokens whose root is not recognized are kept as literals so they still
/// show up on the sheet; literals are never transposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChordToken {
    Symbol(ChordSymbol),
    Literal(String),
}

impl ChordToken {
    /// Parse a raw token, falling back to a literal on an unrecognized root
    #[must_use]
    pub fn parse(token: &str) -> Self {
        ChordSymbol::parse(token).map_or_else(|_| Self::Literal(token.to_string()), Self::Symbol)
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    #[must_use]
    pub fn transpose(&self, semitones: i32) -> Self {
        match self {
            Self::Symbol(symbol) => Self::Symbol(symbol.transpose(semitones)),
            Self::Literal(text) => Self::Literal(text.clone()),
        }
    }

    /// Text written into the overlay for this token
    #[must_use]
    pub fn render(&self, spelling: Spelling) -> String {
        match self {
            Self::Symbol(symbol) => symbol.render(spelling),
            Self::Literal(text) => text.clone(),
        }
    }
}

impl From<&str> for ChordToken {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<ChordSymbol> for ChordToken {
    fn from(symbol: ChordSymbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(symbol) => fmt::Display::fmt(symbol, f),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// Split a token into its recognized root and the remaining suffix
fn split_root(token: &str) -> Option<(PitchClass, &str)> {
    let first = token.chars().next()?;
    let mut root_len = first.len_utf8();
    if matches!(token[root_len..].chars().next(), Some('#' | 'b')) {
        root_len += 1;
    }
    let root = PitchClass::from_spelling(&token[..root_len])?;
    Some((root, &token[root_len..]))
}
