//! BpmnViz - BPMN 2.0 diagrams turned into a renderable model.
//!
//! Reads BPMN documents, as XML text or as their JSON tree, and builds the
//! [`BpmnModel`](model::BpmnModel) a rendering engine draws: pools, lanes,
//! flow nodes and edges with their geometry.

pub mod config;

mod error;

pub use bpmnviz_core::{geometry, model, semantic};
pub use bpmnviz_parser::{Diagnostic, SourceMap, Span};

pub use error::BpmnVizError;

use log::{debug, info, trace};
use serde_json::Value;

use bpmnviz_parser::{ParseOutcome, ParserConfig, xml};

use config::AppConfig;
use model::BpmnModel;

/// A parsed document: the model, the warnings met while building it and,
/// for XML input, where each element sits in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDiagram {
    model: BpmnModel,
    warnings: Vec<Diagnostic>,
    source_map: Option<SourceMap>,
}

impl ParsedDiagram {
    fn new(outcome: ParseOutcome, source_map: Option<SourceMap>) -> Self {
        let (model, warnings) = outcome.into_parts();
        Self {
            model,
            warnings,
            source_map,
        }
    }

    pub fn model(&self) -> &BpmnModel {
        &self.model
    }

    /// Warnings of the parse, in the order they were found.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Spans of the elements in the XML source. `None` for JSON input.
    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }
}

/// Builder for parsing BPMN documents and serializing their model.
///
/// # Examples
///
/// ```
/// use bpmnviz::{ModelBuilder, config::AppConfig};
///
/// let source = r#"<definitions><process id="p1"><task id="t1"/></process></definitions>"#;
///
/// let builder = ModelBuilder::new(AppConfig::default());
/// let diagram = builder.parse_xml(source).expect("Failed to parse");
/// let json = builder.to_json(diagram.model()).expect("Failed to serialize");
///
/// assert!(json.contains("flowNodes"));
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    config: AppConfig,
}

impl ModelBuilder {
    /// Create a new model builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse BPMN XML text.
    ///
    /// # Errors
    ///
    /// Returns [`BpmnVizError::Parse`] when the text is not well-formed XML
    /// or has no `definitions` root.
    pub fn parse_xml(&self, source: &str) -> Result<ParsedDiagram, BpmnVizError> {
        info!(bytes = source.len(); "Parsing BPMN XML");
        let document =
            xml::to_json(source).map_err(|err| BpmnVizError::new_parse_error(err, source))?;
        let (tree, source_map) = document.into_parts();

        let outcome = bpmnviz_parser::parse(&tree, self.parser_config())
            .map_err(|err| BpmnVizError::new_parse_error(err, source))?;
        debug!(warnings = outcome.diagnostics().len(); "XML document parsed");
        Ok(ParsedDiagram::new(outcome, Some(source_map)))
    }

    /// Parse the JSON text of a BPMN document tree.
    ///
    /// # Errors
    ///
    /// Returns [`BpmnVizError::Json`] for invalid JSON and
    /// [`BpmnVizError::Parse`] when the tree has no `definitions` root.
    pub fn parse_json_str(&self, source: &str) -> Result<ParsedDiagram, BpmnVizError> {
        info!(bytes = source.len(); "Parsing BPMN JSON");
        let document: Value = serde_json::from_str(source)?;
        let outcome = bpmnviz_parser::parse(&document, self.parser_config())
            .map_err(|err| BpmnVizError::new_parse_error(err, source))?;
        Ok(ParsedDiagram::new(outcome, None))
    }

    /// Parse an already deserialized BPMN document tree.
    ///
    /// # Errors
    ///
    /// Returns [`BpmnVizError::Parse`] when the tree has no `definitions` root.
    pub fn parse_json(&self, document: &Value) -> Result<ParsedDiagram, BpmnVizError> {
        let outcome = bpmnviz_parser::parse(document, self.parser_config())
            .map_err(|err| BpmnVizError::new_parse_error(err, String::new()))?;
        Ok(ParsedDiagram::new(outcome, None))
    }

    /// Serialize a model to JSON, indented when the output config asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`BpmnVizError::Json`] if serialization fails.
    pub fn to_json(&self, model: &BpmnModel) -> Result<String, BpmnVizError> {
        trace!(model:?; "Serializing model");
        let json = if self.config.output().pretty() {
            serde_json::to_string_pretty(model)?
        } else {
            serde_json::to_string(model)?
        };
        Ok(json)
    }

    fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            log_warnings: self.config.parser().log_warnings(),
        }
    }
}
