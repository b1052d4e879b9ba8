//! # BpmnViz Parser
//!
//! Deserialization pipeline for BPMN 2.0 documents. This crate turns the
//! loosely-typed JSON tree of a BPMN document into the renderable
//! [`BpmnModel`] of `bpmnviz-core`.
//!
//! The input tree is what an XML-to-JSON conversion of BPMN XML produces:
//! namespace prefixes stripped, attributes as plain fields, a repeated child
//! as an array and a single one as an object. [`xml::to_json`] builds such a
//! tree from XML text and keeps a [`SourceMap`] for reporting.
//!
//! ## Usage
//!
//! ```
//! # use bpmnviz_parser::{parse, ParserConfig, ParseError};
//! # use serde_json::json;
//! fn main() -> Result<(), ParseError> {
//!     let document = json!({
//!         "definitions": {
//!             "process": {
//!                 "id": "p1",
//!                 "startEvent": { "id": "start" },
//!                 "task": { "id": "check", "name": "Check order" },
//!                 "sequenceFlow": { "id": "f1", "sourceRef": "start", "targetRef": "check" },
//!             },
//!         },
//!     });
//!
//!     let outcome = parse(&document, ParserConfig::default())?;
//!     assert!(outcome.diagnostics().is_empty());
//!     Ok(())
//! }
//! ```
//!
//! Defects local to an element never stop a parse: the element is left out
//! and a warning is returned in [`ParseOutcome::diagnostics`]. Each call
//! builds its own lookup tables, so parses may run concurrently.

mod converter;
pub mod element;
pub mod error;
pub mod normalize;
pub mod registry;
mod span;
pub mod xml;

pub use error::{Diagnostic, ParseError};
pub use span::{SourceMap, Span};

use std::borrow::Cow;

use log::info;
use serde_json::{Map, Value};

use bpmnviz_core::model::BpmnModel;

use converter::{ParseContext, category, collaboration, diagram, event_definition, process, root_element};
use element::JsonElement;
use error::ErrorCode;

/// Options of one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Log every warning at `warn` level as it is found.
    pub log_warnings: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { log_warnings: true }
    }
}

/// The result of a successful parse: the model and the warnings met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    model: BpmnModel,
    diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn model(&self) -> &BpmnModel {
        &self.model
    }

    /// Warnings in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (BpmnModel, Vec<Diagnostic>) {
        (self.model, self.diagnostics)
    }
}

/// Parse the JSON tree of a BPMN document into a [`BpmnModel`].
///
/// The pipeline runs in four steps over one shared parse context:
///
/// 1. **Pre-pass** - Register categories, root event definitions, processes
///    and global tasks
/// 2. **Collaboration** - Register participants, message flows and
///    collaboration artifacts
/// 3. **Processes** - Classify flow nodes, lanes, artifacts and sequence
///    flows, then check parents and flow ends
/// 4. **Diagram** - Attach bounds, waypoints and labels from the first diagram
///
/// # Errors
///
/// Fails only when the document has no usable root: the tree is not an
/// object ([`ErrorCode::E001`]) or has no `definitions` element
/// ([`ErrorCode::E002`]). An empty `definitions` element gives an empty
/// model. Every other defect is a warning of the outcome.
pub fn parse(document: &Value, config: ParserConfig) -> Result<ParseOutcome, ParseError> {
    let Value::Object(root) = document else {
        return Err(Diagnostic::error("document is not a JSON object")
            .with_code(ErrorCode::E001)
            .into());
    };
    let definitions = match root.get("definitions") {
        Some(definitions @ Value::Object(_)) => JsonElement::borrowed(definitions),
        // An empty `<definitions/>` element arrives as an empty string.
        Some(Value::String(text)) if text.trim().is_empty() => {
            JsonElement::new(Cow::Owned(Value::Object(Map::new())))
        }
        _ => {
            return Err(Diagnostic::error("document has no `definitions` element")
                .with_code(ErrorCode::E002)
                .with_help("the root of a BPMN document is a `definitions` element")
                .into());
        }
    };
    let mut context = ParseContext::new(config.log_warnings);

    // Step 1: Pre-pass
    category::deserialize(&definitions, &mut context.registry);
    event_definition::deserialize(&definitions, &mut context.registry);
    root_element::deserialize(&definitions, &mut context.registry);

    // Step 2: Collaboration
    collaboration::deserialize(&definitions, &mut context);

    // Step 3: Processes
    process::ProcessConverter::new(&mut context).deserialize(&definitions);

    // Step 4: Diagram
    let model = diagram::deserialize(&definitions, &mut context);

    if context.collector.has_errors() {
        return Err(ParseError::new(context.collector.into_diagnostics()));
    }
    let diagnostics = context.collector.into_diagnostics();
    info!(
        flow_nodes = model.flow_nodes().len(),
        edges = model.edges().len(),
        warnings = diagnostics.len();
        "Document parsed"
    );
    Ok(ParseOutcome { model, diagnostics })
}
