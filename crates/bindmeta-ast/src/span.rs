//! Source location tracking
//!
//! Spans are supplied by the front-end and only used for diagnostics.

use serde::{Deserialize, Serialize};

/// A byte range in the source file of the enclosing declaring type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// True when the front-end supplied no location
    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

/// A span together with the file it points into
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub file: Option<String>,
    pub span: Span,
}

impl Location {
    pub fn new(file: Option<String>, span: Span) -> Self {
        Self { file, span }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}..{}", file, self.span.start, self.span.end),
            None => write!(f, "<unknown>:{}..{}", self.span.start, self.span.end),
        }
    }
}
