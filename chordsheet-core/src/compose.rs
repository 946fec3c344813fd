//! Line overlay compositor: lays transposed chords out on a text row that
//! sits directly above its lyric line.

use crate::error::{Warning, WarningKind};
use crate::pitch::Spelling;
use crate::sheet::ChordPlacement;
use tracing::{debug, warn};

const LOG_TARGET: &str = "chordsheet::compose";

/// Result of composing one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    /// `None` when the line had no placements at all
    pub overlay: Option<String>,
    pub warnings: Vec<Warning>,
}

/// Composes chord overlays for a fixed transposition and spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineComposer {
    semitones: i32,
    spelling: Spelling,
}

impl LineComposer {
    #[must_use]
    pub const fn new(semitones: i32, spelling: Spelling) -> Self {
        Self {
            semitones,
            spelling,
        }
    }

    /// Build the chord row for `text`.
    ///
    /// Placements are written in ascending column order (ties keep input
    /// order) into a space-filled buffer at least as wide as the lyric line.
    /// A later chord overwrites an earlier one only where they overlap.
    /// Columns outside `0..=len` are clamped, unrecognized tokens are written
    /// verbatim; both are reported as warnings against `line`. Trailing
    /// whitespace is trimmed, leading and interior spacing is kept.
    ///
    /// The overlay is normally at least `column + chord width` long for the
    /// rightmost chord. The exception is a chord whose own text ends in
    /// whitespace (e.g. the literal `"N.C. "`): that whitespace is trimmed
    /// too, so the overlay stops at the chord's last visible character.
    #[must_use]
    pub fn compose(&self, line: usize, text: &str, placements: &[ChordPlacement]) -> Composition {
        if placements.is_empty() {
            return Composition::default();
        }

        let line_len = text.chars().count();
        let mut warnings = Vec::new();

        let mut ordered: Vec<(usize, Vec<char>)> = placements
            .iter()
            .map(|placement| {
                let column = clamp_column(placement.column, line_len);
                if column.clamped {
                    warn!(
                        target: LOG_TARGET,
                        "Line {}: chord {} at column {} moved to {}",
                        line, placement.chord, placement.column, column.value
                    );
                    warnings.push(Warning {
                        line,
                        column: placement.column,
                        kind: WarningKind::ColumnClamped {
                            requested: placement.column,
                            clamped: column.value,
                        },
                    });
                }
                if !placement.chord.is_recognized() {
                    warn!(
                        target: LOG_TARGET,
                        "Line {}: unrecognized chord {:?} kept verbatim", line, placement.chord.to_string()
                    );
                    warnings.push(Warning {
                        line,
                        column: placement.column,
                        kind: WarningKind::UnrecognizedRoot {
                            token: placement.chord.to_string(),
                        },
                    });
                }
                let rendered = placement
                    .chord
                    .transpose(self.semitones)
                    .render(self.spelling);
                (column.value, rendered.chars().collect())
            })
            .collect();

        // Stable: equal columns stay in input order, so the later one wins
        ordered.sort_by_key(|(column, _)| *column);

        let mut buffer = vec![' '; line_len];
        for (column, chars) in &ordered {
            let end = column + chars.len();
            if buffer.len() < end {
                buffer.resize(end, ' ');
            }
            buffer[*column..end].copy_from_slice(chars);
        }

        let mut overlay: String = buffer.into_iter().collect();
        overlay.truncate(overlay.trim_end().len());

        debug!(
            target: LOG_TARGET,
            "Line {}: placed {} chord(s), overlay width {}",
            line,
            placements.len(),
            overlay.chars().count()
        );

        Composition {
            overlay: Some(overlay),
            warnings,
        }
    }
}

/// Compose the chord overlay for a single line using sharp spelling.
///
/// Returns `None` if `placements` is empty.
#[must_use]
pub fn compose(line_text: &str, placements: &[ChordPlacement], semitones: i32) -> Option<String> {
    LineComposer::new(semitones, Spelling::Sharps)
        .compose(0, line_text, placements)
        .overlay
}

struct Column {
    value: usize,
    clamped: bool,
}

fn clamp_column(requested: i64, line_len: usize) -> Column {
    match usize::try_from(requested) {
        Ok(column) if column <= line_len => Column {
            value: column,
            clamped: false,
        },
        Ok(_) => Column {
            value: line_len,
            clamped: true,
        },
        Err(_) if requested < 0 => Column {
            value: 0,
            clamped: true,
        },
        // Wider than usize on this target
        Err(_) => Column {
            value: line_len,
            clamped: true,
        },
    }
}
