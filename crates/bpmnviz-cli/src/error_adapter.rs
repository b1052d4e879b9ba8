//! Error adapter for converting BpmnViz diagnostics to miette reports.
//!
//! This module provides the bridge between the library's diagnostic types
//! and miette's rich formatting used in the CLI.
//!
//! Parser labels name element ids. When the document came from XML, the
//! [`SourceMap`] turns each id into the span of its start tag so miette can
//! underline it; labels of ids without a span are left out of the snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use bpmnviz::{BpmnVizError, ParsedDiagram, SourceMap};
use bpmnviz_parser::{Diagnostic, Span, error::Severity};

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source text for displaying snippets
    src: &'a str,
    /// Element spans in `src`, when known
    source_map: Option<&'a SourceMap>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str, source_map: Option<&'a SourceMap>) -> Self {
        Self {
            diag,
            src,
            source_map,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        let severity = match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        };
        Some(severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_map
            .map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let source_map = self.source_map?;
        let labels: Vec<LabeledSpan> = self
            .diag
            .labels()
            .iter()
            .filter_map(|label| {
                let span = span_to_miette(source_map.span_of(label.element_id())?);
                let message = Some(label.message().to_string());
                Some(if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                })
            })
            .collect();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.into_iter()))
    }
}

/// Adapter for non-diagnostic [`BpmnVizError`] variants.
pub struct ErrorAdapter<'a>(pub &'a BpmnVizError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BpmnVizError::Io(_) => "bpmnviz::io",
            BpmnVizError::Parse { .. } => return None,
            BpmnVizError::Json(_) => "bpmnviz::json",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a parser [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`BpmnVizError`] into a list of reportable errors.
///
/// For [`BpmnVizError::Parse`], this returns one [`Reportable`] for each
/// diagnostic in the error. Fatal diagnostics carry no element labels, so
/// no source map is needed. Other variants give a single [`Reportable`].
pub fn to_reportables(err: &BpmnVizError) -> Vec<Reportable<'_>> {
    match err {
        BpmnVizError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src, None)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Adapt the warnings of a parsed diagram, labels placed through its source map.
pub fn warning_reportables<'a>(diagram: &'a ParsedDiagram, src: &'a str) -> Vec<Reportable<'a>> {
    diagram
        .warnings()
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src, diagram.source_map())))
        .collect()
}

#[cfg(test)]
mod tests {
    use bpmnviz::ModelBuilder;
    use bpmnviz_parser::error::{ErrorCode, ParseError};

    use super::*;

    const SOURCE: &str = r#"<definitions><process id="p1"><task id="t1"/><boundaryEvent id="b1" attachedToRef="t1"/></process></definitions>"#;

    #[test]
    fn test_parse_error_reportables() {
        let diags = vec![
            Diagnostic::error("first error").with_code(ErrorCode::E001),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E002)
                .with_help("help for second"),
        ];
        let err = BpmnVizError::new_parse_error(ParseError::new(diags), "{}");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
        assert_eq!(
            reportables[1].help().map(|help| help.to_string()).as_deref(),
            Some("help for second")
        );
    }

    #[test]
    fn test_non_parse_error() {
        let err = BpmnVizError::Io(std::io::Error::other("disk full"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: disk full");
                assert_eq!(e.code().map(|code| code.to_string()).as_deref(), Some("bpmnviz::io"));
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_warning_labels_use_source_map() {
        let builder = ModelBuilder::default();
        let diagram = builder.parse_xml(SOURCE).unwrap();

        let reportables = warning_reportables(&diagram, SOURCE);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        let start = labels[0].offset();
        assert!(SOURCE[start..].starts_with(r#"<boundaryEvent id="b1""#));
    }

    #[test]
    fn test_labels_without_source_map() {
        let diag = Diagnostic::warning("lane references unknown flow node")
            .with_code(ErrorCode::W103)
            .with_label("lane_1", "lane");

        let adapter = DiagnosticAdapter::new(&diag, "", None);

        assert!(adapter.labels().is_none());
        assert!(adapter.source_code().is_none());
    }

    #[test]
    fn test_unmapped_labels_are_skipped() {
        let mut source_map = SourceMap::new();
        source_map.insert("b1", Span::new(10..20));
        let diag = Diagnostic::warning("boundary event is not attached to an activity")
            .with_label("b1", "boundary event")
            .with_secondary_label("ghost", "unknown element");

        let adapter = DiagnosticAdapter::new(&diag, "0123456789abcdefghij", Some(&source_map));

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("boundary event"));
        assert_eq!(labels[0].offset(), 10);
        assert_eq!(labels[0].len(), 10);
    }
}
