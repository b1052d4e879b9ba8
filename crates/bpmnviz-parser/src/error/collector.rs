//! Collector for accumulating the diagnostics of one parse.
//!
//! Converters report every local defect to the [`DiagnosticCollector`] and
//! carry on, so one parse reports all of a document's problems at once.

use log::warn;

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics during a parse.
///
/// When `log_warnings` is set, each warning is also written to the `log`
/// facade as it is emitted.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
    log_warnings: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new(log_warnings: bool) -> Self {
        Self {
            log_warnings,
            ..Self::default()
        }
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else if self.log_warnings {
            warn!(
                code:? = diagnostic.code(),
                element_id:? = diagnostic.element_id();
                "{}", diagnostic.message()
            );
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns the diagnostics emitted so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return all diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_is_empty() {
        let collector = DiagnosticCollector::new(false);
        assert!(!collector.has_errors());
        assert!(collector.into_diagnostics().is_empty());
    }

    #[test]
    fn test_collector_warnings_only() {
        let mut collector = DiagnosticCollector::new(true);

        collector.emit(Diagnostic::warning("warning 1").with_code(ErrorCode::W100));
        collector.emit(Diagnostic::warning("warning 2"));

        assert!(!collector.has_errors());
        assert_eq!(collector.diagnostics().len(), 2);
    }

    #[test]
    fn test_collector_emit_error() {
        let mut collector = DiagnosticCollector::new(false);

        collector.emit(Diagnostic::warning("warning"));
        collector.emit(Diagnostic::error("error").with_code(ErrorCode::E002));

        assert!(collector.has_errors());
        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].message(), "error");
    }
}
