//! Pre-pass registration of processes and global tasks.
//!
//! Call activities and participants reference both by id, possibly before
//! they are declared.

use log::debug;

use bpmnviz_core::semantic::GlobalTaskKind;

use crate::{
    element::JsonElement,
    registry::{ConvertedElements, Process},
};

pub(crate) fn deserialize(definitions: &JsonElement<'_>, registry: &mut ConvertedElements) {
    for process in definitions.children("process", false) {
        if let Some(id) = process.id() {
            debug!(id; "Registering process");
            registry.register_process(Process::new(id, process.name()));
        }
    }

    for kind in GlobalTaskKind::ALL {
        for global_task in definitions.children(kind.as_str(), true) {
            if let Some(id) = global_task.id() {
                debug!(id, kind:%; "Registering global task");
                registry.register_global_task(id, kind);
            }
        }
    }
}
