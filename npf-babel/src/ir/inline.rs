//! Inline formatting data: the ranges a post annotates its text with, and the
//! flat spans they resolve into.

use serde::{Deserialize, Serialize};

/// A formatting annotation over `[start, end)` of a block's text, in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRange {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FormatRange {
    pub fn new(start: usize, end: usize, kind: impl Into<String>) -> Self {
        FormatRange {
            start,
            end,
            kind: kind.into(),
        }
    }
}

/// A piece of text with one fixed set of formats. Spans produced for one text
/// never overlap and cover it exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub formats: Vec<&'a FormatRange>,
}

impl ResolvedSpan<'_> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether any covering range has the given format type.
    pub fn has_format(&self, kind: &str) -> bool {
        self.formats.iter().any(|f| f.kind == kind)
    }
}
