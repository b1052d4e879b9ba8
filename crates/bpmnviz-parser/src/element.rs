//! Read access to one element of the loosely-typed document tree.
//!
//! Attribute values arrive as strings from the XML front end, but JSON trees
//! built by other tools carry numbers and booleans. [`JsonElement`] accepts
//! all of them for every attribute it reads.

use std::borrow::Cow;

use serde_json::Value;

use crate::normalize::ensure_array;

/// Key holding the text content of an element with attributes or children.
pub(crate) const TEXT_KEY: &str = "#text";

/// A view over one element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonElement<'a> {
    value: Cow<'a, Value>,
}

impl<'a> JsonElement<'a> {
    pub fn new(value: Cow<'a, Value>) -> Self {
        Self { value }
    }

    /// View a borrowed value.
    pub fn borrowed(value: &'a Value) -> Self {
        Self::new(Cow::Borrowed(value))
    }

    /// Get the underlying value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if the element has a field named `key`.
    pub fn has(&self, key: &str) -> bool {
        self.field(key).is_some_and(|value| !value.is_null())
    }

    /// Get the `id` attribute.
    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    /// Get the `name` attribute.
    pub fn name(&self) -> Option<String> {
        self.attr("name")
    }

    /// Read an attribute as a string. Numbers and booleans are formatted.
    pub fn attr(&self, key: &str) -> Option<String> {
        self.field(key).and_then(scalar_to_string)
    }

    /// Read an attribute as a boolean: `true`/`false` or their string forms.
    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        match self.field(key)? {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => match text.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Read an attribute as a number.
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        match self.field(key)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text content of the element itself.
    ///
    /// Text-only elements are plain strings in the tree; elements that also
    /// have attributes keep their text under `#text`.
    pub fn text(&self) -> Option<String> {
        match self.value.as_ref() {
            Value::Object(object) => object.get(TEXT_KEY).and_then(scalar_to_string),
            other => scalar_to_string(other),
        }
    }

    /// Text content of the first child named `key`.
    pub fn child_text(&self, key: &str) -> Option<String> {
        self.child(key).and_then(|child| child.text())
    }

    /// All children named `key`, normalized to a list.
    ///
    /// See [`ensure_array`] for the meaning of `accept_empty_string`.
    pub fn children(&self, key: &str, accept_empty_string: bool) -> Vec<JsonElement<'_>> {
        ensure_array(self.field(key), accept_empty_string)
            .into_iter()
            .map(JsonElement::new)
            .collect()
    }

    /// The first child named `key`, if any.
    pub fn child(&self, key: &str) -> Option<JsonElement<'_>> {
        self.children(key, true).into_iter().next()
    }

    /// Texts of all children named `key`, such as `flowNodeRef` or `incoming`.
    pub fn refs(&self, key: &str) -> Vec<String> {
        self.children(key, false)
            .iter()
            .filter_map(JsonElement::text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.value.as_object()?.get(key)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
