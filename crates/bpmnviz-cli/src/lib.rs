//! CLI logic for the BpmnViz tool.
//!
//! Reads a BPMN document, builds its model, reports the warnings of the parse
//! and writes the model as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{info, warn};

use bpmnviz::{
    BpmnVizError, ModelBuilder, ParsedDiagram,
    config::{AppConfig, ParserConfig},
};

use error_adapter::warning_reportables;

/// Run the BpmnViz CLI application
///
/// The input is read as a JSON document tree when its extension is `.json`
/// and as BPMN XML otherwise. Warnings are rendered through miette at `warn`
/// level; the model is written to the output file.
///
/// # Errors
///
/// Returns `BpmnVizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input or a missing `definitions` root
pub fn run(args: &Args) -> Result<(), BpmnVizError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    // Load configuration. Warnings are rendered here, so the parser stays quiet.
    let app_config = config::load_config(args.config.as_ref())?;
    let show_warnings = app_config.parser().log_warnings();
    let app_config = AppConfig::new(ParserConfig::new(false), app_config.output().clone());

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Parse and serialize using the ModelBuilder API
    let builder = ModelBuilder::new(app_config);
    let diagram = if is_json_input(&args.input) {
        builder.parse_json_str(&source)?
    } else {
        builder.parse_xml(&source)?
    };
    if show_warnings {
        report_warnings(&diagram, &source);
    }
    let json = builder.to_json(diagram.model())?;

    // Write output file
    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        warnings = diagram.warnings().len();
        "Model exported successfully"
    );

    Ok(())
}

fn is_json_input(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

fn report_warnings(diagram: &ParsedDiagram, source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warning_reportables(diagram, source) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{reportable}"),
        }
    }
}
