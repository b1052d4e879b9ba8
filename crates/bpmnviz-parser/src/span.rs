//! Byte ranges in BPMN XML source text.

use std::{collections::HashMap, ops::Range};

/// A byte range in source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

/// Location of every element carrying an `id` in the XML source.
///
/// Diagnostics name element ids; this map turns them back into source
/// locations for reporting. When an id is declared twice, the last
/// declaration wins, matching how the converters register elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    spans: HashMap<String, Span>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the span of the element with id `id`.
    pub fn insert(&mut self, id: impl Into<String>, span: Span) {
        self.spans.insert(id.into(), span);
    }

    /// Get the span of the element with id `id`.
    pub fn span_of(&self, id: &str) -> Option<Span> {
        self.spans.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
