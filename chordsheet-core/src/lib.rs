//! Chord sheet composition engine.
//!
//! Parses chord symbols, transposes them around the 12-tone circle and lays
//! them out on overlay rows aligned with the lyric characters they belong to.
//! Everything here is pure: no I/O beyond optional config loading, no shared
//! state.

pub mod chord;
pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod pitch;
pub mod sheet;
pub mod transpose;

pub use chord::{ChordSymbol, ChordToken};
pub use compose::{compose, Composition, LineComposer};
pub use config::{ComposeConfig, CONFIG_TEMPLATE};
pub use document::{assemble, Assembler, Document, RenderLine, RenderUnit, SheetHeader};
pub use error::{CoreError, Result, Warning, WarningKind};
pub use pitch::{PitchClass, Spelling};
pub use sheet::{ChordLine, ChordPlacement, ChordSheet, LineKind, LyricLine, SongInfo};
pub use transpose::{transposition_label, Transposition, MAX_SEMITONES};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
