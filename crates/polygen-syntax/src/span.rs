//! Source spans
//!
//! Byte-offset spans attached to every syntax node. The extractor only
//! forwards spans into diagnostics; it never interprets them.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Placeholder span for synthesized nodes.
    pub fn synthetic() -> Self {
        Span::default()
    }
}
