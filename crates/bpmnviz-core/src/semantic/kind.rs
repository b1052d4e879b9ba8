//! Closed classifications of BPMN elements.
//!
//! Every enumeration here mirrors a fixed BPMN 2.0 vocabulary. The string
//! form of each variant ([`ShapeBpmnElementKind::as_str`] and friends) is the
//! name used by the BPMN XML schema, so it doubles as the field name looked up
//! in the deserialized document tree.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Error returned when a string does not name a variant of a BPMN vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} `{value}`")]
pub struct UnknownKindError {
    vocabulary: &'static str,
    value: String,
}

impl UnknownKindError {
    pub(crate) fn new(vocabulary: &'static str, value: &str) -> Self {
        Self {
            vocabulary,
            value: value.to_string(),
        }
    }

    /// Returns the rejected string.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The kind of a BPMN shape element.
///
/// Serialized and displayed with the BPMN XML element name (`userTask`,
/// `exclusiveGateway`, ...). `Pool` has no XML element of its own: pools are
/// materialized from collaboration participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeBpmnElementKind {
    Lane,
    Pool,
    CallActivity,
    SubProcess,
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    ManualTask,
    BusinessRuleTask,
    ReceiveTask,
    SendTask,
    ExclusiveGateway,
    InclusiveGateway,
    ParallelGateway,
    EventBasedGateway,
    ComplexGateway,
    StartEvent,
    EndEvent,
    BoundaryEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    TextAnnotation,
    Group,
    DataObject,
    DataObjectReference,
    DataStoreReference,
}

impl ShapeBpmnElementKind {
    /// Task kinds.
    pub const TASKS: [Self; 8] = [
        Self::Task,
        Self::UserTask,
        Self::ServiceTask,
        Self::ScriptTask,
        Self::ManualTask,
        Self::BusinessRuleTask,
        Self::ReceiveTask,
        Self::SendTask,
    ];

    /// Gateway kinds.
    pub const GATEWAYS: [Self; 5] = [
        Self::ExclusiveGateway,
        Self::InclusiveGateway,
        Self::ParallelGateway,
        Self::EventBasedGateway,
        Self::ComplexGateway,
    ];

    /// Event kinds, boundary events last.
    ///
    /// Boundary events reference the activity they are attached to, so they
    /// are converted after every other flow node of their scope.
    pub const EVENTS: [Self; 5] = [
        Self::StartEvent,
        Self::EndEvent,
        Self::IntermediateCatchEvent,
        Self::IntermediateThrowEvent,
        Self::BoundaryEvent,
    ];

    /// Returns the BPMN XML element name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lane => "lane",
            Self::Pool => "pool",
            Self::CallActivity => "callActivity",
            Self::SubProcess => "subProcess",
            Self::Task => "task",
            Self::UserTask => "userTask",
            Self::ServiceTask => "serviceTask",
            Self::ScriptTask => "scriptTask",
            Self::ManualTask => "manualTask",
            Self::BusinessRuleTask => "businessRuleTask",
            Self::ReceiveTask => "receiveTask",
            Self::SendTask => "sendTask",
            Self::ExclusiveGateway => "exclusiveGateway",
            Self::InclusiveGateway => "inclusiveGateway",
            Self::ParallelGateway => "parallelGateway",
            Self::EventBasedGateway => "eventBasedGateway",
            Self::ComplexGateway => "complexGateway",
            Self::StartEvent => "startEvent",
            Self::EndEvent => "endEvent",
            Self::BoundaryEvent => "boundaryEvent",
            Self::IntermediateCatchEvent => "intermediateCatchEvent",
            Self::IntermediateThrowEvent => "intermediateThrowEvent",
            Self::TextAnnotation => "textAnnotation",
            Self::Group => "group",
            Self::DataObject => "dataObject",
            Self::DataObjectReference => "dataObjectReference",
            Self::DataStoreReference => "dataStoreReference",
        }
    }

    /// Returns `true` for every task kind.
    pub fn is_task(self) -> bool {
        Self::TASKS.contains(&self)
    }

    /// Returns `true` for tasks, call activities and sub-processes.
    pub fn is_activity(self) -> bool {
        self.is_task() || matches!(self, Self::CallActivity | Self::SubProcess)
    }

    /// Returns `true` for every gateway kind.
    pub fn is_gateway(self) -> bool {
        Self::GATEWAYS.contains(&self)
    }

    /// Returns `true` for every event kind, including boundary events.
    pub fn is_event(self) -> bool {
        Self::EVENTS.contains(&self)
    }
}

impl fmt::Display for ShapeBpmnElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The trigger or result semantics of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventDefinitionKind {
    None,
    Message,
    Timer,
    Signal,
    Error,
    Escalation,
    Cancel,
    Compensation,
    Conditional,
    Link,
    Terminate,
}

impl EventDefinitionKind {
    /// Every kind that is backed by an event definition element, i.e. all but `None`.
    pub const DEFINED: [Self; 10] = [
        Self::Message,
        Self::Timer,
        Self::Signal,
        Self::Error,
        Self::Escalation,
        Self::Cancel,
        Self::Compensation,
        Self::Conditional,
        Self::Link,
        Self::Terminate,
    ];

    /// Returns the name of the event definition element for this kind.
    ///
    /// `None` has no definition element.
    pub fn definition_field(self) -> Option<&'static str> {
        let field = match self {
            Self::None => return None,
            Self::Message => "messageEventDefinition",
            Self::Timer => "timerEventDefinition",
            Self::Signal => "signalEventDefinition",
            Self::Error => "errorEventDefinition",
            Self::Escalation => "escalationEventDefinition",
            Self::Cancel => "cancelEventDefinition",
            Self::Compensation => "compensateEventDefinition",
            Self::Conditional => "conditionalEventDefinition",
            Self::Link => "linkEventDefinition",
            Self::Terminate => "terminateEventDefinition",
        };
        Some(field)
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Message => "message",
            Self::Timer => "timer",
            Self::Signal => "signal",
            Self::Error => "error",
            Self::Escalation => "escalation",
            Self::Cancel => "cancel",
            Self::Compensation => "compensation",
            Self::Conditional => "conditional",
            Self::Link => "link",
            Self::Terminate => "terminate",
        }
    }
}

impl fmt::Display for EventDefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Markers drawn at the bottom of an activity.
///
/// The declaration order is the canonical display order, so sorting a marker
/// list puts it in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Loop,
    MultiInstanceParallel,
    MultiInstanceSequential,
    Compensation,
    Expand,
    #[serde(rename = "adhoc")]
    AdHoc,
}

/// Puts markers in canonical display order and removes duplicates.
///
/// # Examples
///
/// ```
/// # use bpmnviz_core::semantic::{MarkerKind, order_markers};
/// let mut markers = vec![MarkerKind::AdHoc, MarkerKind::Expand, MarkerKind::Loop];
/// order_markers(&mut markers);
/// assert_eq!(markers, [MarkerKind::Loop, MarkerKind::Expand, MarkerKind::AdHoc]);
/// ```
pub fn order_markers(markers: &mut Vec<MarkerKind>) {
    markers.sort();
    markers.dedup();
}

/// The flavor of a sub-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubProcessKind {
    /// A plain `subProcess`.
    Embedded,
    /// A `subProcess` with `triggeredByEvent="true"`.
    Event,
    /// An `adHocSubProcess`.
    AdHoc,
    /// A `transaction`.
    Transaction,
}

/// What a call activity invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CallActivityKind {
    CallingProcess,
    CallingGlobalTask,
}

/// Kinds of reusable tasks declared at the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GlobalTaskKind {
    GlobalTask,
    GlobalUserTask,
    GlobalManualTask,
    GlobalScriptTask,
    GlobalBusinessRuleTask,
}

impl GlobalTaskKind {
    /// All global task kinds.
    pub const ALL: [Self; 5] = [
        Self::GlobalTask,
        Self::GlobalUserTask,
        Self::GlobalManualTask,
        Self::GlobalScriptTask,
        Self::GlobalBusinessRuleTask,
    ];

    /// Returns the BPMN XML element name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlobalTask => "globalTask",
            Self::GlobalUserTask => "globalUserTask",
            Self::GlobalManualTask => "globalManualTask",
            Self::GlobalScriptTask => "globalScriptTask",
            Self::GlobalBusinessRuleTask => "globalBusinessRuleTask",
        }
    }

    /// Returns the task kind a call to this global task is equivalent to.
    pub fn task_kind(self) -> ShapeBpmnElementKind {
        match self {
            Self::GlobalTask => ShapeBpmnElementKind::Task,
            Self::GlobalUserTask => ShapeBpmnElementKind::UserTask,
            Self::GlobalManualTask => ShapeBpmnElementKind::ManualTask,
            Self::GlobalScriptTask => ShapeBpmnElementKind::ScriptTask,
            Self::GlobalBusinessRuleTask => ShapeBpmnElementKind::BusinessRuleTask,
        }
    }
}

impl fmt::Display for GlobalTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `eventGatewayType` of an event-based gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventBasedGatewayKind {
    #[default]
    None,
    Exclusive,
    Parallel,
}

impl FromStr for EventBasedGatewayKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Exclusive" => Ok(Self::Exclusive),
            "Parallel" => Ok(Self::Parallel),
            "None" => Ok(Self::None),
            _ => Err(UnknownKindError::new("event gateway type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_as_str() {
        assert_eq!(ShapeBpmnElementKind::UserTask.as_str(), "userTask");
        assert_eq!(
            ShapeBpmnElementKind::IntermediateCatchEvent.to_string(),
            "intermediateCatchEvent"
        );
        assert_eq!(ShapeBpmnElementKind::Pool.as_str(), "pool");
    }

    #[test]
    fn test_element_kind_serializes_as_xml_name() {
        let value = serde_json::to_value(ShapeBpmnElementKind::BusinessRuleTask).unwrap();
        assert_eq!(value, "businessRuleTask");
        let value = serde_json::to_value(ShapeBpmnElementKind::DataStoreReference).unwrap();
        assert_eq!(value, "dataStoreReference");
    }

    #[test]
    fn test_element_kind_classification() {
        assert!(ShapeBpmnElementKind::SendTask.is_task());
        assert!(ShapeBpmnElementKind::SendTask.is_activity());
        assert!(ShapeBpmnElementKind::CallActivity.is_activity());
        assert!(ShapeBpmnElementKind::SubProcess.is_activity());
        assert!(!ShapeBpmnElementKind::CallActivity.is_task());
        assert!(!ShapeBpmnElementKind::ParallelGateway.is_activity());
        assert!(ShapeBpmnElementKind::ParallelGateway.is_gateway());
        assert!(ShapeBpmnElementKind::BoundaryEvent.is_event());
        assert!(!ShapeBpmnElementKind::Lane.is_activity());
        assert!(!ShapeBpmnElementKind::Lane.is_event());
    }

    #[test]
    fn test_boundary_events_are_last() {
        assert_eq!(
            ShapeBpmnElementKind::EVENTS.last(),
            Some(&ShapeBpmnElementKind::BoundaryEvent)
        );
    }

    #[test]
    fn test_event_definition_fields() {
        assert_eq!(EventDefinitionKind::None.definition_field(), None);
        assert_eq!(
            EventDefinitionKind::Compensation.definition_field(),
            Some("compensateEventDefinition")
        );
        assert!(
            EventDefinitionKind::DEFINED
                .iter()
                .all(|kind| kind.definition_field().is_some())
        );
    }

    #[test]
    fn test_order_markers() {
        let mut markers = vec![
            MarkerKind::AdHoc,
            MarkerKind::Compensation,
            MarkerKind::Expand,
            MarkerKind::MultiInstanceSequential,
            MarkerKind::Loop,
            MarkerKind::Expand,
        ];
        order_markers(&mut markers);
        assert_eq!(
            markers,
            [
                MarkerKind::Loop,
                MarkerKind::MultiInstanceSequential,
                MarkerKind::Compensation,
                MarkerKind::Expand,
                MarkerKind::AdHoc,
            ]
        );
    }

    #[test]
    fn test_marker_serialize() {
        assert_eq!(serde_json::to_value(MarkerKind::AdHoc).unwrap(), "adhoc");
        assert_eq!(
            serde_json::to_value(MarkerKind::MultiInstanceParallel).unwrap(),
            "multiInstanceParallel"
        );
    }

    #[test]
    fn test_global_task_kind_maps_to_task() {
        assert_eq!(
            GlobalTaskKind::GlobalUserTask.task_kind(),
            ShapeBpmnElementKind::UserTask
        );
        assert_eq!(GlobalTaskKind::GlobalTask.task_kind(), ShapeBpmnElementKind::Task);
        assert_eq!(GlobalTaskKind::GlobalScriptTask.as_str(), "globalScriptTask");
    }

    #[test]
    fn test_event_based_gateway_kind_from_str() {
        assert_eq!(
            "Parallel".parse::<EventBasedGatewayKind>(),
            Ok(EventBasedGatewayKind::Parallel)
        );
        let err = "Sometimes".parse::<EventBasedGatewayKind>().unwrap_err();
        assert_eq!(err.value(), "Sometimes");
        assert_eq!(err.to_string(), "unknown event gateway type `Sometimes`");
    }
}
