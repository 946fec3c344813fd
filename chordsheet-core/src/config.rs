use crate::error::{CoreError, Result};
use crate::pitch::Spelling;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options controlling how a chord sheet is composed.
///
/// Always passed explicitly; nothing here is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// How transposed roots are written
    #[serde(default)]
    pub spelling: Spelling,
    /// Documents with at least this many lines are composed on the rayon pool
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Opening delimiter of a section header line, e.g. `[Chorus]`
    #[serde(default = "default_section_open")]
    pub section_open: String,
    /// Closing delimiter of a section header line
    #[serde(default = "default_section_close")]
    pub section_close: String,
}

const fn default_parallel_threshold() -> usize {
    256
}

fn default_section_open() -> String {
    "[".to_string()
}

fn default_section_close() -> String {
    "]".to_string()
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            spelling: Spelling::default(),
            parallel_threshold: default_parallel_threshold(),
            section_open: default_section_open(),
            section_close: default_section_close(),
        }
    }
}

impl ComposeConfig {
    /// Parse and validate a config from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this struct or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check values that serde alone cannot reject
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "parallel_threshold must be at least 1".to_string(),
            });
        }
        if self.section_open.is_empty() || self.section_close.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "section_open and section_close must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Commented config file with every option at its default value
pub const CONFIG_TEMPLATE: &str = r##"# Chord sheet composition settings

# How transposed chord roots are written: "sharps" (C#, D#, ...) or "flats" (Db, Eb, ...)
spelling = "sharps"

# Documents with at least this many lines are composed in parallel
parallel_threshold = 256

# Lines wrapped in these delimiters are section headers, e.g. [Chorus]
section_open = "["
section_close = "]"
"##;
