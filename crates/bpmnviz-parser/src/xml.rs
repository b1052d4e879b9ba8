//! XML front end: BPMN XML text to the loosely-typed JSON tree.
//!
//! The tree has the shape produced by common XML-to-JSON converters, which
//! is the shape [`parse`](crate::parse) expects:
//!
//! - element and attribute names lose their namespace prefix
//! - attribute values are strings
//! - a repeated child becomes an array, a single child stays an object
//! - an element with neither attributes nor child elements becomes its
//!   trimmed text, so `<incoming>f1</incoming>` is `"f1"` and
//!   `<timerEventDefinition/>` is `""`
//! - other elements keep non-blank text under `#text`
//!
//! Namespace declarations are not copied into the tree.

use serde_json::{Map, Value};

use crate::{
    element::TEXT_KEY,
    error::{Diagnostic, ErrorCode},
    span::{SourceMap, Span},
};

/// A converted XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    tree: Value,
    source_map: SourceMap,
}

impl XmlDocument {
    /// The JSON tree, with the root element under its local name.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Start-tag spans of every element carrying an `id`.
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn into_parts(self) -> (Value, SourceMap) {
        (self.tree, self.source_map)
    }
}

/// Convert BPMN XML text into the JSON tree consumed by [`parse`](crate::parse).
///
/// # Errors
///
/// Returns an [`ErrorCode::E003`] diagnostic when the text is not well-formed XML.
///
/// # Examples
///
/// ```
/// # use bpmnviz_parser::xml::to_json;
/// let source = r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
///   <process id="p1"><task id="t1" name="Check"/></process>
/// </definitions>"#;
/// let document = to_json(source).unwrap();
///
/// assert_eq!(document.tree()["definitions"]["process"]["task"]["name"], "Check");
/// assert!(document.source_map().span_of("t1").is_some());
/// ```
pub fn to_json(source: &str) -> Result<XmlDocument, Diagnostic> {
    let document = roxmltree::Document::parse(source).map_err(|err| {
        Diagnostic::error(format!("malformed XML: {err}"))
            .with_code(ErrorCode::E003)
            .with_help("check that the file is a well-formed BPMN 2.0 XML document")
    })?;

    let mut source_map = SourceMap::new();
    let root = document.root_element();
    let value = convert_element(root, source, &mut source_map);

    let mut tree = Map::new();
    tree.insert(root.tag_name().name().to_string(), value);
    Ok(XmlDocument {
        tree: Value::Object(tree),
        source_map,
    })
}

fn convert_element(node: roxmltree::Node<'_, '_>, source: &str, source_map: &mut SourceMap) -> Value {
    let mut object = Map::new();
    for attribute in node.attributes() {
        object.insert(
            attribute.name().to_string(),
            Value::String(attribute.value().to_string()),
        );
    }
    if let Some(id) = node.attribute("id") {
        source_map.insert(id, start_tag_span(source, node.range().start));
    }

    let mut text = String::new();
    let mut has_child_elements = false;
    for child in node.children() {
        if child.is_element() {
            has_child_elements = true;
            let value = convert_element(child, source, source_map);
            insert_child(&mut object, child.tag_name().name(), value);
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if object.is_empty() && !has_child_elements {
        return Value::String(text.to_string());
    }
    if !text.is_empty() {
        object.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Object(object)
}

/// Add a child under `name`, turning the field into an array on repetition.
fn insert_child(object: &mut Map<String, Value>, name: &str, value: Value) {
    match object.get_mut(name) {
        None => {
            object.insert(name.to_string(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Span from `<` to the `>` closing the start tag, ignoring `>` in quoted values.
fn start_tag_span(source: &str, start: usize) -> Span {
    let mut quote = None;
    for (offset, byte) in source.as_bytes()[start..].iter().enumerate() {
        match (quote, byte) {
            (None, b'"' | b'\'') => quote = Some(*byte),
            (Some(open), _) if open == *byte => quote = None,
            (None, b'>') => return Span::new(start..start + offset + 1),
            _ => {}
        }
    }
    Span::new(start..source.len())
}
