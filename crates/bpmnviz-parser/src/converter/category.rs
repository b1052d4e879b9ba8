//! Pre-pass registration of category values.
//!
//! Groups take their name from the category value they reference.

use log::debug;

use crate::{element::JsonElement, registry::ConvertedElements};

/// Register every `category[].categoryValue[]` of the document root.
pub(crate) fn deserialize(definitions: &JsonElement<'_>, registry: &mut ConvertedElements) {
    for category in definitions.children("category", false) {
        for category_value in category.children("categoryValue", false) {
            let Some(id) = category_value.id() else {
                continue;
            };
            let value = category_value.attr("value");
            debug!(id, value:?; "Registering category value");
            registry.register_category_value(id, value);
        }
    }
}
