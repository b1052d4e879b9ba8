//! Collaboration: participants, message flows and collaboration artifacts.

use log::{debug, info};

use bpmnviz_core::semantic::{Flow, FlowKind};

use crate::{
    converter::{
        ParseContext,
        artifact::{self, flow_ends, required_id},
    },
    element::JsonElement,
    error::Result,
    registry::Participant,
};

/// Register the participants and message flows of every collaboration.
pub(crate) fn deserialize(definitions: &JsonElement<'_>, context: &mut ParseContext) {
    for collaboration in definitions.children("collaboration", false) {
        let participants = collaboration.children("participant", false);
        info!(
            collaboration_id:? = collaboration.id(),
            participants = participants.len();
            "Converting collaboration"
        );

        for participant in participants {
            let id = match required_id(&participant, "participant") {
                Ok(id) => id,
                Err(diagnostic) => {
                    context.warn(diagnostic);
                    continue;
                }
            };
            let process_ref = participant.attr("processRef");
            debug!(id, process_ref:?; "Registering participant");
            context
                .registry
                .register_participant(Participant::new(id, participant.name(), process_ref));
        }

        for message_flow in collaboration.children("messageFlow", false) {
            let id = message_flow.id();
            match build_message_flow(&message_flow) {
                Ok(flow) => context.registry.register_message_flow(flow),
                Err(diagnostic) => context.reject(id.as_deref(), diagnostic),
            }
        }

        artifact::convert_artifacts(&collaboration, None, context);
    }
}

fn build_message_flow(message_flow: &JsonElement<'_>) -> Result<Flow> {
    let id = required_id(message_flow, "message flow")?;
    let (source_ref, target_ref) = flow_ends(message_flow, &id)?;
    Ok(Flow::new(
        id,
        message_flow.name(),
        FlowKind::MessageFlow,
        source_ref,
        target_ref,
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_participants_and_message_flows() {
        let definitions = json!({
            "collaboration": {
                "id": "collab_1",
                "participant": [
                    { "id": "p1", "name": "Shop", "processRef": "process_1" },
                    { "id": "p2", "name": "Customer" },
                ],
                "messageFlow": { "id": "mf1", "sourceRef": "p2", "targetRef": "p1", "name": "Order" },
                "textAnnotation": { "id": "note_1", "text": "Collaboration note" },
            },
        });
        let mut context = ParseContext::new(false);
        deserialize(&JsonElement::borrowed(&definitions), &mut context);

        let registry = &context.registry;
        assert_eq!(
            registry.find_participant_by_id("p1").and_then(Participant::process_ref),
            Some("process_1")
        );
        assert_eq!(
            registry
                .find_participant_by_process_ref("process_1")
                .map(Participant::id),
            Some("p1")
        );
        assert!(registry.find_participant_by_id("p2").is_some());

        let flow = registry.find_message_flow_by_id("mf1").unwrap();
        assert_eq!(flow.kind(), FlowKind::MessageFlow);
        assert_eq!(flow.name(), Some("Order"));

        let note = registry.find_flow_node_by_id("note_1").unwrap();
        assert_eq!(note.parent_id(), None);
    }

    #[test]
    fn test_participant_without_id() {
        let definitions = json!({
            "collaboration": {
                "participant": [{ "name": "Nameless", "processRef": "process_1" }, { "id": "p1" }],
            },
        });
        let mut context = ParseContext::new(false);
        deserialize(&JsonElement::borrowed(&definitions), &mut context);

        assert!(context.registry.find_participant_by_process_ref("process_1").is_none());
        assert_eq!(context.registry.participants().count(), 1);
        let diagnostics = context.collector.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::W100));
    }
}
