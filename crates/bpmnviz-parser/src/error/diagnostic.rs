//! The core diagnostic type for the BpmnViz error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! code, labels naming BPMN elements, and help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode, label::Label};

/// A diagnostic message about a BPMN document.
///
/// # Example
///
/// ```text
/// warning[W103]: lane references unknown flow node `task_9`
///   --> process.bpmn:12:7
///    |
/// 12 |       <bpmn:lane id="lane_1" name="Sales">
///    |       ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ lane with unknown flowNodeRef
///    |
///    = help: remove the reference or declare the flow node in the process
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use bpmnviz_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::warning("group references unknown category value `cv_1`")
    ///     .with_code(ErrorCode::W104)
    ///     .with_label("group_1", "group without category value");
    ///
    /// assert_eq!(diag.to_string(), "warning[W104]: group references unknown category value `cv_1`");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Get the id of the element named by the first primary label.
    pub fn element_id(&self) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::element_id)
    }

    /// Set the code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label on the element with id `element_id`.
    pub fn with_label(mut self, element_id: impl Into<String>, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(element_id, message));
        self
    }

    /// Add a secondary label on the element with id `element_id`.
    pub fn with_secondary_label(
        mut self,
        element_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(Label::secondary(element_id, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
