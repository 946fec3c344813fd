//! Input data model: lyric lines with chord placements.
//!
//! [`ChordSheet`] is the typed form of the JSON hand-off from the upstream
//! chord-to-lyrics mapper. It is parsed once here and turned into
//! [`LyricLine`] values; nothing later in the pipeline re-reads raw text.

use crate::chord::ChordToken;
use crate::config::ComposeConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A chord anchored at a character column of its owning line.
///
/// The column is relative to the start of the line. Out-of-range columns are
/// legal input and are clamped during composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordPlacement {
    pub column: i64,
    pub chord: ChordToken,
}

impl ChordPlacement {
    pub fn new(column: i64, chord: impl Into<ChordToken>) -> Self {
        Self {
            column,
            chord: chord.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    SectionHeader,
    Blank,
    Text,
}

/// One line of the song as handed to the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricLine {
    /// A structural marker such as "Verse 1"; never carries chords
    SectionHeader { name: String },
    /// Vertical spacing between stanzas
    Blank,
    /// A lyric line with zero or more chords above it
    Text {
        text: String,
        placements: Vec<ChordPlacement>,
    },
}

impl LyricLine {
    pub fn section(name: impl Into<String>) -> Self {
        Self::SectionHeader { name: name.into() }
    }

    #[must_use]
    pub const fn blank() -> Self {
        Self::Blank
    }

    pub fn text(text: impl Into<String>, placements: Vec<ChordPlacement>) -> Self {
        Self::Text {
            text: text.into(),
            placements,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::SectionHeader { .. } => LineKind::SectionHeader,
            Self::Blank => LineKind::Blank,
            Self::Text { .. } => LineKind::Text,
        }
    }

    /// Chord placements of a text line; empty for every other kind
    #[must_use]
    pub fn placements(&self) -> &[ChordPlacement] {
        match self {
            Self::Text { placements, .. } => placements,
            Self::SectionHeader { .. } | Self::Blank => &[],
        }
    }
}

/// Song metadata delivered alongside the lyrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongInfo {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub spotify_id: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub time_signature: Option<u32>,
}

/// A raw lyric line with `(column, chord)` pairs, as produced upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordLine {
    pub lyrics_line: String,
    #[serde(default)]
    pub chords: Vec<(i64, String)>,
}

impl ChordLine {
    /// Decide what kind of line this is and parse its chord tokens.
    ///
    /// A line wrapped in the configured section delimiters becomes a section
    /// header (its chords are ignored), a whitespace-only line becomes a
    /// blank, and anything else is a text line.
    #[must_use]
    pub fn classify(&self, config: &ComposeConfig) -> LyricLine {
        let trimmed = self.lyrics_line.trim();
        if trimmed.is_empty() {
            return LyricLine::Blank;
        }

        if let Some(name) = trimmed
            .strip_prefix(config.section_open.as_str())
            .and_then(|rest| rest.strip_suffix(config.section_close.as_str()))
        {
            return LyricLine::section(name.trim());
        }

        let placements = self
            .chords
            .iter()
            .map(|(column, token)| ChordPlacement::new(*column, ChordToken::parse(token)))
            .collect();
        LyricLine::text(self.lyrics_line.clone(), placements)
    }
}

/// Complete analyzed song: metadata plus chord-annotated lyric lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSheet {
    pub song_info: SongInfo,
    pub key: String,
    pub tempo: f64,
    #[serde(default)]
    pub capo: Option<u32>,
    #[serde(default)]
    pub lines: Vec<ChordLine>,
}

impl ChordSheet {
    /// Parse a chord sheet from its JSON form
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::SheetParseError`] if the JSON does not match the sheet shape.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Classify every line, preserving order and count
    #[must_use]
    pub fn lyric_lines(&self, config: &ComposeConfig) -> Vec<LyricLine> {
        self.lines.iter().map(|line| line.classify(config)).collect()
    }
}
