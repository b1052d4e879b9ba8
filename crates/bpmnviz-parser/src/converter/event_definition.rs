//! Pre-pass registration of event definitions declared at the document root.
//!
//! Events may reference a shared definition through `eventDefinitionRef`
//! instead of embedding one; the registered kinds resolve those references.

use log::debug;

use bpmnviz_core::semantic::EventDefinitionKind;

use crate::{element::JsonElement, registry::ConvertedElements};

/// Register the id and kind of every root `<kind>EventDefinition`.
///
/// A definition without body (`<timerEventDefinition id="t"/>` has one
/// attribute, but `<terminateEventDefinition/>` has none) is still a
/// definition, so empty strings are accepted.
pub(crate) fn deserialize(definitions: &JsonElement<'_>, registry: &mut ConvertedElements) {
    for kind in EventDefinitionKind::DEFINED {
        let Some(field) = kind.definition_field() else {
            continue;
        };
        for definition in definitions.children(field, true) {
            if let Some(id) = definition.id() {
                debug!(id, kind:%; "Registering event definition");
                registry.register_event_definition(id, kind);
            }
        }
    }
}
