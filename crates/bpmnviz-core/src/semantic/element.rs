//! Shape elements of the semantic model.

use std::fmt;

use serde::Serialize;

use crate::semantic::kind::{
    CallActivityKind, EventBasedGatewayKind, EventDefinitionKind, GlobalTaskKind, MarkerKind,
    ShapeBpmnElementKind, SubProcessKind, order_markers,
};

/// Kind-specific data of a [`ShapeBpmnElement`].
///
/// Each variant only applies to the element kinds named in its documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ShapeDetails {
    /// Lanes, pools, gateways other than event-based ones, and artifacts.
    #[default]
    Plain,
    /// Tasks.
    Activity { markers: Vec<MarkerKind> },
    /// Sub-processes, transactions and ad-hoc sub-processes.
    SubProcess {
        sub_process_kind: SubProcessKind,
        markers: Vec<MarkerKind>,
    },
    /// Call activities.
    CallActivity {
        call_activity_kind: CallActivityKind,
        called_element: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        global_task_kind: Option<GlobalTaskKind>,
        /// The task kind a call to a global task stands for.
        #[serde(skip_serializing_if = "Option::is_none")]
        called_task_kind: Option<ShapeBpmnElementKind>,
        markers: Vec<MarkerKind>,
    },
    /// End, intermediate catch and intermediate throw events.
    Event {
        event_definition_kind: EventDefinitionKind,
    },
    /// Start events. `is_interrupting` is only set on event sub-process starts.
    StartEvent {
        event_definition_kind: EventDefinitionKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_interrupting: Option<bool>,
    },
    /// Boundary events.
    BoundaryEvent {
        event_definition_kind: EventDefinitionKind,
        is_interrupting: bool,
    },
    /// Event-based gateways.
    EventBasedGateway {
        instantiate: bool,
        gateway_kind: EventBasedGatewayKind,
    },
}

impl ShapeDetails {
    /// Returns `true` for [`ShapeDetails::Plain`].
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// A BPMN element drawn as a shape: flow nodes, lanes, pools and artifacts.
///
/// The element is identified by its BPMN `id`. `parent_id` names the
/// containing pool, lane, sub-process or call activity; boundary events use it
/// for the activity they are attached to.
///
/// # Examples
///
/// ```
/// # use bpmnviz_core::semantic::{ShapeBpmnElement, ShapeBpmnElementKind, ShapeDetails};
/// # use bpmnviz_core::semantic::{EventDefinitionKind};
/// let event = ShapeBpmnElement::new(
///     "boundary_1",
///     Some("Timeout".to_string()),
///     ShapeBpmnElementKind::BoundaryEvent,
///     Some("task_1".to_string()),
/// )
/// .with_details(ShapeDetails::BoundaryEvent {
///     event_definition_kind: EventDefinitionKind::Timer,
///     is_interrupting: true,
/// });
///
/// assert_eq!(event.parent_id(), Some("task_1"));
/// assert_eq!(event.event_definition_kind(), Some(EventDefinitionKind::Timer));
/// assert_eq!(event.is_interrupting(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBpmnElement {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    kind: ShapeBpmnElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    incoming_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outgoing_ids: Vec<String>,
    #[serde(skip_serializing_if = "ShapeDetails::is_plain")]
    details: ShapeDetails,
}

impl ShapeBpmnElement {
    /// Create a new element without kind-specific details.
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        kind: ShapeBpmnElementKind,
        parent_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            kind,
            parent_id,
            incoming_ids: Vec::new(),
            outgoing_ids: Vec::new(),
            details: ShapeDetails::Plain,
        }
    }

    /// Attach kind-specific details. Markers are put in canonical order.
    pub fn with_details(mut self, mut details: ShapeDetails) -> Self {
        if let Some(markers) = details_markers_mut(&mut details) {
            order_markers(markers);
        }
        self.details = details;
        self
    }

    /// Get the element identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the element name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the element kind.
    pub fn kind(&self) -> ShapeBpmnElementKind {
        self.kind
    }

    /// Get the id of the containing element, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Ids of the flows entering this element.
    pub fn incoming_ids(&self) -> &[String] {
        &self.incoming_ids
    }

    /// Ids of the flows leaving this element.
    pub fn outgoing_ids(&self) -> &[String] {
        &self.outgoing_ids
    }

    /// Borrow the kind-specific details.
    pub fn details(&self) -> &ShapeDetails {
        &self.details
    }

    /// Activity markers in display order; empty for non-activities.
    pub fn markers(&self) -> &[MarkerKind] {
        match &self.details {
            ShapeDetails::Activity { markers }
            | ShapeDetails::SubProcess { markers, .. }
            | ShapeDetails::CallActivity { markers, .. } => markers,
            _ => &[],
        }
    }

    /// The event definition kind of an event.
    pub fn event_definition_kind(&self) -> Option<EventDefinitionKind> {
        match self.details {
            ShapeDetails::Event {
                event_definition_kind,
            }
            | ShapeDetails::StartEvent {
                event_definition_kind,
                ..
            }
            | ShapeDetails::BoundaryEvent {
                event_definition_kind,
                ..
            } => Some(event_definition_kind),
            _ => None,
        }
    }

    /// Whether a boundary event (or an event sub-process start) interrupts.
    pub fn is_interrupting(&self) -> Option<bool> {
        match self.details {
            ShapeDetails::BoundaryEvent {
                is_interrupting, ..
            } => Some(is_interrupting),
            ShapeDetails::StartEvent {
                is_interrupting, ..
            } => is_interrupting,
            _ => None,
        }
    }

    /// The kind of a sub-process.
    pub fn sub_process_kind(&self) -> Option<SubProcessKind> {
        match self.details {
            ShapeDetails::SubProcess {
                sub_process_kind, ..
            } => Some(sub_process_kind),
            _ => None,
        }
    }

    /// What a call activity invokes.
    pub fn call_activity_kind(&self) -> Option<CallActivityKind> {
        match self.details {
            ShapeDetails::CallActivity {
                call_activity_kind, ..
            } => Some(call_activity_kind),
            _ => None,
        }
    }

    /// The global task kind invoked by a call activity.
    pub fn global_task_kind(&self) -> Option<GlobalTaskKind> {
        match self.details {
            ShapeDetails::CallActivity {
                global_task_kind, ..
            } => global_task_kind,
            _ => None,
        }
    }

    /// The task kind equivalent to the global task a call activity invokes.
    pub fn called_task_kind(&self) -> Option<ShapeBpmnElementKind> {
        match self.details {
            ShapeDetails::CallActivity {
                called_task_kind, ..
            } => called_task_kind,
            _ => None,
        }
    }

    /// The id of the process or global task a call activity invokes.
    pub fn called_element(&self) -> Option<&str> {
        match &self.details {
            ShapeDetails::CallActivity { called_element, .. } => Some(called_element),
            _ => None,
        }
    }

    /// Set or clear the containing element.
    pub fn set_parent_id(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
    }

    /// Record an incoming flow id. Duplicates are ignored.
    pub fn add_incoming_id(&mut self, flow_id: &str) {
        if !self.incoming_ids.iter().any(|id| id == flow_id) {
            self.incoming_ids.push(flow_id.to_string());
        }
    }

    /// Record an outgoing flow id. Duplicates are ignored.
    pub fn add_outgoing_id(&mut self, flow_id: &str) {
        if !self.outgoing_ids.iter().any(|id| id == flow_id) {
            self.outgoing_ids.push(flow_id.to_string());
        }
    }

    /// Add a marker to an activity, keeping display order.
    ///
    /// Returns `false` when the element carries no markers.
    pub fn add_marker(&mut self, marker: MarkerKind) -> bool {
        match details_markers_mut(&mut self.details) {
            Some(markers) => {
                markers.push(marker);
                order_markers(markers);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for ShapeBpmnElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.id)
    }
}

fn details_markers_mut(details: &mut ShapeDetails) -> Option<&mut Vec<MarkerKind>> {
    match details {
        ShapeDetails::Activity { markers }
        | ShapeDetails::SubProcess { markers, .. }
        | ShapeDetails::CallActivity { markers, .. } => Some(markers),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> ShapeBpmnElement {
        ShapeBpmnElement::new(id, None, ShapeBpmnElementKind::Task, None)
            .with_details(ShapeDetails::Activity { markers: vec![] })
    }

    #[test]
    fn test_plain_element() {
        let lane = ShapeBpmnElement::new(
            "lane_1",
            Some("Sales".to_string()),
            ShapeBpmnElementKind::Lane,
            Some("pool_1".to_string()),
        );
        assert_eq!(lane.id(), "lane_1");
        assert_eq!(lane.name(), Some("Sales"));
        assert_eq!(lane.parent_id(), Some("pool_1"));
        assert!(lane.details().is_plain());
        assert!(lane.markers().is_empty());
        assert_eq!(lane.event_definition_kind(), None);
        assert_eq!(lane.to_string(), "lane `lane_1`");
    }

    #[test]
    fn test_with_details_orders_markers() {
        let sub_process = ShapeBpmnElement::new(
            "sub_1",
            None,
            ShapeBpmnElementKind::SubProcess,
            None,
        )
        .with_details(ShapeDetails::SubProcess {
            sub_process_kind: SubProcessKind::AdHoc,
            markers: vec![MarkerKind::AdHoc, MarkerKind::Loop],
        });
        assert_eq!(sub_process.markers(), [MarkerKind::Loop, MarkerKind::AdHoc]);
        assert_eq!(sub_process.sub_process_kind(), Some(SubProcessKind::AdHoc));
    }

    #[test]
    fn test_add_marker() {
        let mut activity = task("task_1");
        assert!(activity.add_marker(MarkerKind::Compensation));
        assert!(activity.add_marker(MarkerKind::MultiInstanceParallel));
        assert_eq!(
            activity.markers(),
            [MarkerKind::MultiInstanceParallel, MarkerKind::Compensation]
        );

        let mut gateway = ShapeBpmnElement::new(
            "gateway_1",
            None,
            ShapeBpmnElementKind::ParallelGateway,
            None,
        );
        assert!(!gateway.add_marker(MarkerKind::Loop));
    }

    #[test]
    fn test_incoming_outgoing_dedup() {
        let mut activity = task("task_1");
        activity.add_incoming_id("flow_1");
        activity.add_incoming_id("flow_1");
        activity.add_outgoing_id("flow_2");
        assert_eq!(activity.incoming_ids(), ["flow_1"]);
        assert_eq!(activity.outgoing_ids(), ["flow_2"]);
    }

    #[test]
    fn test_call_activity_accessors() {
        let call_activity = ShapeBpmnElement::new(
            "call_1",
            None,
            ShapeBpmnElementKind::CallActivity,
            None,
        )
        .with_details(ShapeDetails::CallActivity {
            call_activity_kind: CallActivityKind::CallingGlobalTask,
            called_element: "global_1".to_string(),
            global_task_kind: Some(GlobalTaskKind::GlobalUserTask),
            called_task_kind: Some(ShapeBpmnElementKind::UserTask),
            markers: vec![],
        });
        assert_eq!(
            call_activity.call_activity_kind(),
            Some(CallActivityKind::CallingGlobalTask)
        );
        assert_eq!(
            call_activity.global_task_kind(),
            Some(GlobalTaskKind::GlobalUserTask)
        );
        assert_eq!(
            call_activity.called_task_kind(),
            Some(ShapeBpmnElementKind::UserTask)
        );
        assert_eq!(call_activity.called_element(), Some("global_1"));
    }

    #[test]
    fn test_start_event_interrupting() {
        let start = ShapeBpmnElement::new("start_1", None, ShapeBpmnElementKind::StartEvent, None)
            .with_details(ShapeDetails::StartEvent {
                event_definition_kind: EventDefinitionKind::None,
                is_interrupting: None,
            });
        assert_eq!(start.is_interrupting(), None);
        assert_eq!(start.event_definition_kind(), Some(EventDefinitionKind::None));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let value = serde_json::to_value(task("task_1")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "task_1",
                "kind": "task",
                "details": { "markers": [] },
            })
        );

        let gateway = ShapeBpmnElement::new(
            "gateway_1",
            None,
            ShapeBpmnElementKind::EventBasedGateway,
            None,
        )
        .with_details(ShapeDetails::EventBasedGateway {
            instantiate: true,
            gateway_kind: EventBasedGatewayKind::Exclusive,
        });
        let value = serde_json::to_value(gateway).unwrap();
        assert_eq!(
            value["details"],
            serde_json::json!({ "instantiate": true, "gatewayKind": "exclusive" })
        );
    }
}
