//! Error and diagnostic system for the BpmnViz parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labels naming the BPMN elements a diagnostic is about
//! - Severity levels
//! - A collector accumulating the warnings of one parse
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional code, labels and help text.
//! Local defects of a document (an unresolved reference, an ambiguous event)
//! become warnings and never stop the parse. Only a document that cannot be
//! read at all is fatal; its diagnostics are wrapped in [`ParseError`].
//!
//! Labels point at element ids rather than source offsets because the parser
//! works on an already deserialized tree. Front ends that kept the source text
//! map ids back to spans (see [`SourceMap`](crate::SourceMap)).
//!
//! # Example
//!
//! ```
//! # use bpmnviz_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("boundary event is not attached to an activity")
//!     .with_code(ErrorCode::W102)
//!     .with_label("boundary_1", "boundary event")
//!     .with_secondary_label("gateway_1", "attached to this exclusiveGateway")
//!     .with_help("attach boundary events to a task, sub-process or call activity");
//!
//! assert_eq!(diag.element_id(), Some("boundary_1"));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
