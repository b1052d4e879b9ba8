//! Error types for BpmnViz operations.
//!
//! This module provides the main error type [`BpmnVizError`] which wraps
//! the error conditions of reading, parsing and serializing a document.

use std::io;

use thiserror::Error;

use bpmnviz_parser::ParseError;

/// The main error type for BpmnViz operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// reporters can point into it.
#[derive(Debug, Error)]
pub enum BpmnVizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BpmnVizError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: impl Into<ParseError>, src: impl Into<String>) -> Self {
        Self::Parse {
            err: err.into(),
            src: src.into(),
        }
    }
}
