//! Configuration types for BpmnViz.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and output settings.
//! - [`ParserConfig`] - Controls how a document is parsed.
//! - [`OutputConfig`] - Controls how the model is serialized.
//!
//! # Example
//!
//! ```
//! # use bpmnviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.parser().log_warnings());
//! assert!(config.output().pretty());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, output: OutputConfig) -> Self {
        Self { parser, output }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Log each warning through `log` as the parser finds it.
    #[serde(default = "default_true")]
    log_warnings: bool,
}

impl ParserConfig {
    pub fn new(log_warnings: bool) -> Self {
        Self { log_warnings }
    }

    pub fn log_warnings(&self) -> bool {
        self.log_warnings
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { log_warnings: true }
    }
}

/// Serialization settings for the model hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Indent the JSON output.
    #[serde(default = "default_true")]
    pretty: bool,
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());

        let config: AppConfig = serde_json::from_str(r#"{ "parser": {} }"#).unwrap();
        assert!(config.parser().log_warnings());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "parser": { "log_warnings": false }, "output": { "pretty": false } }"#)
                .unwrap();

        assert!(!config.parser().log_warnings());
        assert!(!config.output().pretty());
    }
}
