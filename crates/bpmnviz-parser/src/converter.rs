//! Conversion of the document tree into the BpmnViz model.
//!
//! Conversion runs in four phases over one shared [`ParseContext`]:
//!
//! 1. **Pre-pass** - [`category`], [`event_definition`] and [`root_element`]
//!    register root definitions that flow nodes refer to by id
//! 2. **Collaboration** - [`collaboration`] registers participants, message
//!    flows and collaboration artifacts
//! 3. **Processes** - [`process`] classifies flow nodes, lanes, artifacts and
//!    flows, then runs the reference checks
//! 4. **Diagram interchange** - [`diagram`] attaches geometry and builds the
//!    final [`BpmnModel`](bpmnviz_core::model::BpmnModel)

pub(crate) mod artifact;
pub(crate) mod category;
pub(crate) mod collaboration;
pub(crate) mod diagram;
pub(crate) mod event_definition;
pub(crate) mod process;
pub(crate) mod root_element;

use std::collections::HashSet;

use crate::{
    error::{Diagnostic, DiagnosticCollector},
    registry::ConvertedElements,
};

/// State of one parse: lookup tables and diagnostics.
///
/// Created per parse and passed by `&mut` through every phase.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    pub(crate) registry: ConvertedElements,
    pub(crate) collector: DiagnosticCollector,
    rejected_ids: HashSet<String>,
}

impl ParseContext {
    pub(crate) fn new(log_warnings: bool) -> Self {
        Self {
            registry: ConvertedElements::new(),
            collector: DiagnosticCollector::new(log_warnings),
            rejected_ids: HashSet::new(),
        }
    }

    /// Report a defect that does not remove an element.
    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        self.collector.emit(diagnostic);
    }

    /// Report an element left out of the model.
    ///
    /// The id is remembered so its diagram-interchange entry is skipped
    /// without a second warning.
    pub(crate) fn reject(&mut self, element_id: Option<&str>, diagnostic: Diagnostic) {
        if let Some(id) = element_id {
            self.rejected_ids.insert(id.to_string());
        }
        self.collector.emit(diagnostic);
    }

    pub(crate) fn is_rejected(&self, element_id: &str) -> bool {
        self.rejected_ids.contains(element_id)
    }
}
