//! Normalization of one-or-many fields.
//!
//! XML-to-JSON conversion collapses repeated children inconsistently: a single
//! `<task>` becomes an object, two become an array, none leaves the key out.
//! Every repeatable field goes through [`ensure_array`] before it is iterated.

use std::{borrow::Cow, slice};

use serde_json::{Map, Value};

/// The three shapes a repeatable field takes in the JSON tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OneOrMany<'a> {
    /// The key is missing or `null`.
    Absent,
    /// A single object, string or scalar.
    Single(&'a Value),
    /// An array of values.
    Many(&'a [Value]),
}

impl<'a> OneOrMany<'a> {
    /// Classify the value of a repeatable field.
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Array(items)) => Self::Many(items),
            Some(value) => Self::Single(value),
        }
    }

    /// Borrow the raw entries, unfiltered.
    pub fn as_slice(&self) -> &'a [Value] {
        match *self {
            Self::Absent => &[],
            Self::Single(value) => slice::from_ref(value),
            Self::Many(items) => items,
        }
    }
}

/// Returns the entries of a one-or-many field as a list.
///
/// `null` entries are dropped. Empty-string entries, which the XML front end
/// produces for empty elements such as `<timerEventDefinition/>`, become an
/// empty object when `accept_empty_string` is set and are dropped otherwise.
/// Every other entry is borrowed from the tree.
///
/// # Examples
///
/// ```
/// # use bpmnviz_parser::normalize::ensure_array;
/// # use serde_json::json;
/// assert!(ensure_array(None, false).is_empty());
/// assert!(ensure_array(Some(&json!("")), false).is_empty());
/// assert_eq!(ensure_array(Some(&json!("")), true)[0].as_ref(), &json!({}));
///
/// let items = json!([{ "id": "a" }, "", { "id": "b" }]);
/// assert_eq!(ensure_array(Some(&items), false).len(), 2);
/// ```
pub fn ensure_array(value: Option<&Value>, accept_empty_string: bool) -> Vec<Cow<'_, Value>> {
    OneOrMany::from_value(value)
        .as_slice()
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(text) if text.is_empty() => {
                accept_empty_string.then(|| Cow::Owned(Value::Object(Map::new())))
            }
            other => Some(Cow::Borrowed(other)),
        })
        .collect()
}
