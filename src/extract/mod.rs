//! Notebook to script extraction.
//!
//! Two strategies are available:
//! - [`ExtractMode::Lines`] scans the raw document text and recognises structure
//!   from literal marker lines (see [`lines`]).
//! - [`ExtractMode::Cells`] parses the document as JSON and walks the code
//!   cells (see [`cells`]).
//!
//! Both apply the same [`Exclusions`] to every candidate source line.

use std::{fs, path::Path};

use clap::ValueEnum;
use tracing::debug;

use crate::{
    error::{Error, Result},
    script::TestScript,
};

pub mod cells;
pub mod lines;

/// Lines containing this substring depend on interactive authentication.
pub const LOGIN_MARKER: &str = "login";

/// Notebook magic commands start with this character.
pub const MAGIC_PREFIX: char = '%';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExtractMode {
    /// Match marker lines in the raw text.
    Lines,
    /// Parse the notebook JSON.
    #[default]
    Cells,
}

/// Rules deciding which source lines never reach the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions {
    pub skip_substrings: Vec<String>,
    pub magic_prefix: char,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            skip_substrings: vec![LOGIN_MARKER.to_string()],
            magic_prefix: MAGIC_PREFIX,
        }
    }
}

impl Exclusions {
    pub fn with_skip_substrings<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_substrings: substrings.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn skips(&self, line: &str) -> bool {
        self.skip_substrings
            .iter()
            .any(|s| !s.is_empty() && line.contains(s.as_str()))
    }

    pub fn is_magic(&self, line: &str) -> bool {
        line.starts_with(self.magic_prefix)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    mode: ExtractMode,
    exclusions: Exclusions,
}

impl Extractor {
    pub fn new(mode: ExtractMode, exclusions: Exclusions) -> Self {
        Self { mode, exclusions }
    }

    /// Read a notebook from disk and rebuild its script.
    pub fn extract(&self, path: &Path) -> Result<TestScript> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.extract_str(path, &text)
    }

    /// Rebuild the script of an already loaded notebook. `path` is only used
    /// for error reporting.
    pub fn extract_str(&self, path: &Path, text: &str) -> Result<TestScript> {
        let lines = match self.mode {
            ExtractMode::Lines => lines::extract_lines(text, &self.exclusions),
            ExtractMode::Cells => {
                let notebook = cells::Notebook::parse(text).map_err(|e| Error::notebook(path, e))?;
                cells::extract_cells(&notebook, &self.exclusions)
            }
        };
        debug!(
            notebook = %path.display(),
            mode = ?self.mode,
            lines = lines.len(),
            "extracted script"
        );
        Ok(TestScript::new(lines))
    }
}
