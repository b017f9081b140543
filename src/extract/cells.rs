//! Structural extraction: parse the notebook JSON and walk its code cells.

use std::borrow::Cow;

use serde::Deserialize;

use super::Exclusions;

/// Opens and closes a triple-quoted block once the JSON escaping is gone.
pub const TRIPLE_QUOTE: &str = "\"\"\"";

/// The parts of an nbformat 4 document the extractor needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub source: Source,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }
}

/// Cell source is stored either as a list of fragments or as one string. A
/// fragment is not necessarily a whole line; the fragments concatenate to the
/// cell text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Lines(Vec<String>),
    Text(String),
}

impl Default for Source {
    fn default() -> Self {
        Source::Lines(Vec::new())
    }
}

impl Source {
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Source::Lines(parts) => Cow::Owned(parts.concat()),
            Source::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

/// Collect the runnable lines of every code cell, in document order.
pub fn extract_cells(notebook: &Notebook, exclusions: &Exclusions) -> Vec<String> {
    let mut out = Vec::new();
    for cell in notebook.cells.iter().filter(|c| c.is_code()) {
        let text = cell.source.text();
        let mut in_comment = false;
        for line in text.lines() {
            if exclusions.skips(line) {
                continue;
            }
            if line.contains(TRIPLE_QUOTE) {
                in_comment = !in_comment;
                continue;
            }
            if in_comment || line.is_empty() || exclusions.is_magic(line) {
                continue;
            }
            out.push(line.to_string());
        }
    }
    out
}
