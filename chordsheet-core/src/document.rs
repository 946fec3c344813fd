//! Document assembler: turns classified lyric lines into ordered render units.

use crate::chord::ChordSymbol;
use crate::compose::LineComposer;
use crate::config::ComposeConfig;
use crate::error::Warning;
use crate::pitch::Spelling;
use crate::sheet::{ChordSheet, LyricLine};
use crate::transpose::transposition_label;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info};

const LOG_TARGET: &str = "chordsheet::document";

/// A lyric line paired with the chord row drawn above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    /// `None` when the line has no chords; the renderer skips the chord row
    pub chord_overlay: Option<String>,
    pub lyric_text: String,
}

/// One output unit, in the same position as the input line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderUnit {
    SectionMarker(String),
    Spacer,
    Line(RenderLine),
}

/// Song details shown above the first line of the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetHeader {
    pub title: String,
    pub artist: String,
    /// Key of the sheet after transposition
    pub key: String,
    pub tempo: f64,
    pub capo: Option<u32>,
    /// e.g. "2 semitones up"; `None` when not transposed
    pub transposition: Option<String>,
}

/// A fully composed chord sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    header: Option<SheetHeader>,
    units: Vec<RenderUnit>,
    semitones: i32,
    warnings: Vec<Warning>,
}

impl Document {
    #[must_use]
    pub const fn header(&self) -> Option<&SheetHeader> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn units(&self) -> &[RenderUnit] {
        &self.units
    }

    /// The single offset applied to every chord in the document
    #[must_use]
    pub const fn semitones(&self) -> i32 {
        self.semitones
    }

    /// Degraded placements encountered while composing, in line order
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn into_units(self) -> Vec<RenderUnit> {
        self.units
    }
}

/// Plain-text rendering: overlays on their own row above each lyric
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{}", header.title)?;
            writeln!(f, "{}", header.artist)?;
            writeln!(f, "Key: {}  Tempo: {} BPM", header.key, header.tempo)?;
            if let Some(capo) = header.capo {
                writeln!(f, "Capo: Fret {capo}")?;
            }
            if let Some(label) = &header.transposition {
                writeln!(f, "Transposed: {label}")?;
            }
            writeln!(f)?;
        }
        for unit in &self.units {
            match unit {
                RenderUnit::SectionMarker(name) => writeln!(f, "[{name}]")?,
                RenderUnit::Spacer => writeln!(f)?,
                RenderUnit::Line(line) => {
                    if let Some(overlay) = &line.chord_overlay {
                        writeln!(f, "{overlay}")?;
                    }
                    writeln!(f, "{}", line.lyric_text)?;
                }
            }
        }
        Ok(())
    }
}

/// Assembles documents under one composition config
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: ComposeConfig,
}

impl Assembler {
    #[must_use]
    pub const fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Produce exactly one render unit per input line, in input order.
    ///
    /// Every chord is transposed by the same `semitones`. Long documents are
    /// composed on the rayon pool; the result is identical either way.
    #[must_use]
    pub fn assemble(&self, lines: &[LyricLine], semitones: i32) -> Document {
        let composer = LineComposer::new(semitones, self.config.spelling);
        let parallel = lines.len() >= self.config.parallel_threshold;

        let rendered: Vec<(RenderUnit, Vec<Warning>)> = if parallel {
            debug!(target: LOG_TARGET, "Composing {} lines in parallel", lines.len());
            lines
                .par_iter()
                .enumerate()
                .map(|(index, line)| render_line(&composer, index, line))
                .collect()
        } else {
            lines
                .iter()
                .enumerate()
                .map(|(index, line)| render_line(&composer, index, line))
                .collect()
        };

        let mut units = Vec::with_capacity(rendered.len());
        let mut warnings = Vec::new();
        for (unit, line_warnings) in rendered {
            units.push(unit);
            warnings.extend(line_warnings);
        }

        info!(
            target: LOG_TARGET,
            "Assembled {} lines at {:+} semitones ({} warnings)",
            units.len(),
            semitones,
            warnings.len()
        );

        Document {
            header: None,
            units,
            semitones,
            warnings,
        }
    }

    /// Classify, compose and attach a header for a whole analyzed sheet
    #[must_use]
    pub fn compose_sheet(&self, sheet: &ChordSheet, semitones: i32) -> Document {
        let lines = sheet.lyric_lines(&self.config);
        let mut document = self.assemble(&lines, semitones);
        document.header = Some(SheetHeader {
            title: sheet.song_info.title.clone(),
            artist: sheet.song_info.artist.clone(),
            key: transpose_key(&sheet.key, semitones, self.config.spelling),
            tempo: sheet.tempo,
            capo: sheet.capo,
            transposition: transposition_label(semitones),
        });
        document
    }
}

/// Assemble with the default config
#[must_use]
pub fn assemble(lines: &[LyricLine], semitones: i32) -> Document {
    Assembler::default().assemble(lines, semitones)
}

fn render_line(composer: &LineComposer, index: usize, line: &LyricLine) -> (RenderUnit, Vec<Warning>) {
    match line {
        LyricLine::SectionHeader { name } => (RenderUnit::SectionMarker(name.clone()), Vec::new()),
        LyricLine::Blank => (RenderUnit::Spacer, Vec::new()),
        LyricLine::Text { text, placements } => {
            let composition = composer.compose(index, text, placements);
            let unit = RenderUnit::Line(RenderLine {
                chord_overlay: composition.overlay,
                lyric_text: text.clone(),
            });
            (unit, composition.warnings)
        }
    }
}

/// Transpose the root at the start of a key name such as "F# Minor".
///
/// Anything that does not start with a recognizable root is returned as is.
fn transpose_key(key: &str, semitones: i32, spelling: Spelling) -> String {
    let trimmed = key.trim();
    let (root, rest) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |at| trimmed.split_at(at));
    ChordSymbol::parse(root).map_or_else(
        |_| trimmed.to_string(),
        |symbol| format!("{}{rest}", symbol.transpose(semitones).render(spelling)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;
    use crate::sheet::ChordPlacement;

    fn text(line: &str, chords: &[(i64, &str)]) -> LyricLine {
        LyricLine::text(
            line,
            chords
                .iter()
                .map(|(column, token)| ChordPlacement::new(*column, *token))
                .collect(),
        )
    }

    fn render(overlay: Option<&str>, lyric: &str) -> RenderUnit {
        RenderUnit::Line(RenderLine {
            chord_overlay: overlay.map(str::to_string),
            lyric_text: lyric.to_string(),
        })
    }

    #[test]
    fn test_assemble_mixed_lines() {
        let lines = vec![
            LyricLine::section("Verse 1"),
            text("La la", &[(0, "Am")]),
            LyricLine::blank(),
        ];
        let document = assemble(&lines, 0);
        assert_eq!(
            document.units(),
            &[
                RenderUnit::SectionMarker("Verse 1".to_string()),
                render(Some("Am"), "La la"),
                RenderUnit::Spacer,
            ]
        );
        assert!(document.warnings().is_empty());
        assert!(document.header().is_none());
    }

    #[test]
    fn test_empty_document() {
        let document = assemble(&[], 4);
        assert!(document.is_empty());
        assert_eq!(document.semitones(), 4);
        assert_eq!(document.to_string(), "");
    }

    #[test]
    fn test_empty_text_line_kept() {
        let document = assemble(&[text("", &[])], 0);
        assert_eq!(document.units(), &[render(None, "")]);
    }

    #[test]
    fn test_text_without_chords_has_no_overlay() {
        let document = assemble(&[text("Just words", &[])], 3);
        assert_eq!(document.units(), &[render(None, "Just words")]);
    }

    #[test]
    fn test_offset_applies_to_every_line() {
        let lines = vec![
            LyricLine::section("Chorus"),
            text("One", &[(0, "C")]),
            text("Two", &[(0, "G"), (2, "Am")]),
        ];
        let document = assemble(&lines, -2);
        assert_eq!(document.units()[1], render(Some("A#"), "One"));
        assert_eq!(document.units()[2], render(Some("F Gm"), "Two"));
    }

    #[test]
    fn test_order_and_count_preserved() {
        let lines: Vec<LyricLine> = (0..50)
            .map(|i| match i % 3 {
                0 => LyricLine::section(format!("Part {i}")),
                1 => LyricLine::blank(),
                _ => text(&format!("line {i}"), &[(0, "D")]),
            })
            .collect();
        let document = assemble(&lines, 1);
        assert_eq!(document.len(), lines.len());
        for (i, unit) in document.units().iter().enumerate() {
            match (i % 3, unit) {
                (0, RenderUnit::SectionMarker(name)) => assert_eq!(name, &format!("Part {i}")),
                (1, RenderUnit::Spacer) => {}
                (2, RenderUnit::Line(line)) => {
                    assert_eq!(line.lyric_text, format!("line {i}"));
                    assert_eq!(line.chord_overlay.as_deref(), Some("D#"));
                }
                other => unreachable!("unexpected unit {other:?}"),
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lines: Vec<LyricLine> = (0..40)
            .map(|i| text("Hello world again", &[(i % 17, "Bbm7"), (-1, "Zz"), (i, "E")]))
            .collect();
        let sequential = Assembler::new(ComposeConfig {
            parallel_threshold: usize::MAX,
            ..ComposeConfig::default()
        })
        .assemble(&lines, 5);
        let parallel = Assembler::new(ComposeConfig {
            parallel_threshold: 1,
            ..ComposeConfig::default()
        })
        .assemble(&lines, 5);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_warnings_keyed_by_line() {
        let lines = vec![
            LyricLine::section("Intro"),
            text("Hello", &[(0, "N.C.")]),
            text("Hi", &[(9, "C")]),
        ];
        let document = assemble(&lines, 0);
        let warnings = document.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].line, 1);
        assert!(matches!(warnings[0].kind, WarningKind::UnrecognizedRoot { .. }));
        assert_eq!(warnings[1].line, 2);
        assert_eq!(
            warnings[1].kind,
            WarningKind::ColumnClamped {
                requested: 9,
                clamped: 2
            }
        );
        assert_eq!(document.units()[2], render(Some("  C"), "Hi"));
    }

    #[test]
    fn test_flat_spelling_config() {
        let assembler = Assembler::new(ComposeConfig {
            spelling: Spelling::Flats,
            ..ComposeConfig::default()
        });
        let document = assembler.assemble(&[text("Hey", &[(0, "A#m")])], 0);
        assert_eq!(document.units()[0], render(Some("Bbm"), "Hey"));
    }

    #[test]
    fn test_display_plain_text() {
        let lines = vec![
            LyricLine::section("Verse 1"),
            text("Hello world", &[(0, "C"), (5, "G")]),
            text("no chords", &[]),
            LyricLine::blank(),
        ];
        let document = assemble(&lines, 0);
        assert_eq!(
            document.to_string(),
            "[Verse 1]\nC    G\nHello world\nno chords\n\n"
        );
    }

    #[test]
    fn test_transpose_key() {
        assert_eq!(transpose_key("F# Minor", 2, Spelling::Sharps), "G# Minor");
        assert_eq!(transpose_key("Eb major", 0, Spelling::Sharps), "D# major");
        assert_eq!(transpose_key("Am", 3, Spelling::Flats), "Cm");
        assert_eq!(transpose_key("Unknown", 3, Spelling::Sharps), "Unknown");
        assert_eq!(transpose_key("", 3, Spelling::Sharps), "");
        assert_eq!(transpose_key("  Unknown  ", 3, Spelling::Sharps), "Unknown");
        assert_eq!(transpose_key("  A minor ", 2, Spelling::Sharps), "B minor");
    }

    #[test]
    fn test_compose_sheet_header() {
        let json = r#"{
            "song_info": {"title": "Wonderwall", "artist": "Oasis", "duration_ms": 258000, "spotify_id": "x"},
            "key": "F# Minor",
            "tempo": 87.5,
            "capo": 2,
            "lines": [
                {"lyrics_line": "[Verse 1]", "chords": []},
                {"lyrics_line": "Today is gonna be", "chords": [[0, "Em7"], [9, "G"]]}
            ]
        }"#;
        let sheet = ChordSheet::from_json(json).unwrap();
        let document = Assembler::default().compose_sheet(&sheet, -1);
        let header = document.header().unwrap();
        assert_eq!(header.key, "F Minor");
        assert_eq!(header.capo, Some(2));
        assert_eq!(header.transposition.as_deref(), Some("1 semitone down"));
        assert_eq!(
            document.to_string(),
            "Wonderwall\nOasis\nKey: F Minor  Tempo: 87.5 BPM\nCapo: Fret 2\nTransposed: 1 semitone down\n\n\
             [Verse 1]\nD#m7     F#\nToday is gonna be\n"
        );
    }
}
