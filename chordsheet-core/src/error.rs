use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Chord errors
    #[error("Unrecognized chord root in token: {token:?}")]
    UnrecognizedRoot { token: String },

    #[error("Transposition of {semitones} semitones is outside -11..=11")]
    TransposeOutOfRange { semitones: i32 },

    // Configuration errors
    #[error("Config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Sheet input errors
    #[error("Failed to parse chord sheet: {0}")]
    SheetParseError(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// A non-fatal problem found while composing a document.
///
/// Composition never aborts on bad chord data; each degraded placement is
/// reported here, keyed by the input line index and the placement's column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    pub column: i64,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The token's root was not a known pitch spelling; it was rendered verbatim
    UnrecognizedRoot { token: String },
    /// The column was outside the lyric line and was moved to the nearest bound
    ColumnClamped { requested: i64, clamped: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnrecognizedRoot { token } => write!(
                f,
                "line {}, column {}: unrecognized chord {token:?} kept verbatim",
                self.line, self.column
            ),
            WarningKind::ColumnClamped { requested, clamped } => write!(
                f,
                "line {}: column {requested} clamped to {clamped}",
                self.line
            ),
        }
    }
}
