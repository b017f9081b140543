//! Marker-line extraction.
//!
//! The raw notebook text is scanned once, line by line, without parsing the
//! JSON. Structure is recognised from exact marker lines:
//!
//! ```text
//!    "cell_type": "code",     -> entering a code cell
//!    "source": [              -> entering that cell's source lines
//!    ]                        -> leaving the source lines (and the cell)
//! ```
//!
//! Each source line is a JSON string literal; [`reconstruct`] peels the
//! literal syntax off by position. Documents formatted differently (one-line
//! arrays, other indentation of markers on the same line) are silently
//! extracted as empty or partial scripts.

use super::Exclusions;

pub const CODE_CELL_MARKER: &str = r#""cell_type": "code","#;
pub const SOURCE_OPEN_MARKER: &str = r#""source": ["#;
pub const SOURCE_CLOSE_MARKER: &str = "]";
/// An escaped `"""` as it appears inside a JSON string.
pub const TRIPLE_QUOTE_TOKEN: &str = r#"\"\"\""#;
const ESCAPED_NEWLINE: &str = r"\n";

/// Position of the scanner within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Idle,
    InCode,
    InSource {
        in_comment: bool,
    },
}

impl LineState {
    pub fn in_code(self) -> bool {
        !matches!(self, LineState::Idle)
    }

    pub fn in_source(self) -> bool {
        matches!(self, LineState::InSource { .. })
    }

    pub fn in_comment(self) -> bool {
        matches!(self, LineState::InSource { in_comment: true })
    }
}

/// Result of feeding one raw line to [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: LineState,
    pub emit: Option<String>,
}

impl Step {
    fn to(state: LineState) -> Self {
        Self { state, emit: None }
    }
}

/// Transition function of the scanner. Rules are checked in order; the first
/// one that applies wins.
pub fn step(state: LineState, raw: &str, exclusions: &Exclusions) -> Step {
    let line = raw.trim();
    match state {
        LineState::InSource { in_comment } => {
            if line == SOURCE_CLOSE_MARKER {
                // Leaving the source block also ends any open triple-quoted region.
                return Step::to(LineState::Idle);
            }
            if exclusions.skips(line) {
                return Step::to(state);
            }
            if line.contains(TRIPLE_QUOTE_TOKEN) {
                return Step::to(LineState::InSource {
                    in_comment: !in_comment,
                });
            }
            if in_comment {
                return Step::to(state);
            }
            let text = reconstruct(line);
            if text.is_empty() || exclusions.is_magic(text) {
                return Step::to(state);
            }
            Step {
                state,
                emit: Some(text.to_string()),
            }
        }
        LineState::InCode if line == SOURCE_OPEN_MARKER => {
            Step::to(LineState::InSource { in_comment: false })
        }
        _ if line == CODE_CELL_MARKER => Step::to(LineState::InCode),
        _ => Step::to(state),
    }
}

/// Strip the JSON string syntax from one trimmed source line: a trailing
/// separator comma, one leading and one trailing quote, then a trailing
/// escaped newline. Each is removed at most once, in that order.
pub fn reconstruct(line: &str) -> &str {
    let line = line.strip_suffix(',').unwrap_or(line);
    let line = line.strip_prefix('"').unwrap_or(line);
    let line = line.strip_suffix('"').unwrap_or(line);
    line.strip_suffix(ESCAPED_NEWLINE).unwrap_or(line)
}

/// Scan a whole document from the idle state and collect the emitted lines.
pub fn extract_lines(text: &str, exclusions: &Exclusions) -> Vec<String> {
    let mut state = LineState::default();
    let mut out = Vec::new();
    for raw in text.lines() {
        let next = step(state, raw, exclusions);
        state = next.state;
        out.extend(next.emit);
    }
    out
}
