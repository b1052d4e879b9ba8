//! Processes: flow nodes, lanes, artifacts and sequence flows.
//!
//! The [`ProcessConverter`] classifies every element of every process and
//! registers it as soon as it is built, so later elements of the same or a
//! nested scope can reference it. Sub-processes are converted recursively
//! with the sub-process as parent. Once all processes are converted, the
//! converter resolves what could only be known at the end: elements of
//! called processes, dangling parents and flow ends, incoming and outgoing
//! flows.

use std::{
    collections::{HashMap, HashSet},
    mem,
};

use log::{debug, info, trace};

use bpmnviz_core::semantic::{
    CallActivityKind, EventBasedGatewayKind, EventDefinitionKind, Flow, FlowKind, GlobalTaskKind,
    MarkerKind, SequenceFlowKind, ShapeBpmnElement, ShapeBpmnElementKind, ShapeDetails,
    SubProcessKind,
};

use crate::{
    converter::{
        ParseContext,
        artifact::{self, flow_ends, required_id},
    },
    element::JsonElement,
    error::{Diagnostic, ErrorCode, Result},
    registry::ConvertedElements,
};

/// Fields declaring sub-processes, with the kind each one produces.
const SUB_PROCESS_FIELDS: [(&str, SubProcessKind); 3] = [
    ("subProcess", SubProcessKind::Embedded),
    ("adHocSubProcess", SubProcessKind::AdHoc),
    ("transaction", SubProcessKind::Transaction),
];

/// Data elements, drawn as plain shapes.
const DATA_KINDS: [ShapeBpmnElementKind; 3] = [
    ShapeBpmnElementKind::DataObject,
    ShapeBpmnElementKind::DataObjectReference,
    ShapeBpmnElementKind::DataStoreReference,
];

/// Where the elements being converted live.
#[derive(Debug, Clone, Copy)]
struct Scope<'s> {
    process_id: &'s str,
    parent_id: Option<&'s str>,
    is_top_level: bool,
    is_event_sub_process: bool,
}

pub(crate) struct ProcessConverter<'c> {
    context: &'c mut ParseContext,
    default_sequence_flow_ids: HashSet<String>,
    /// Top-level elements created without parent, by process id.
    parentless_ids_by_process: HashMap<String, Vec<String>>,
    /// `(call activity id, called process id)` pairs.
    process_calls: Vec<(String, String)>,
}

impl<'c> ProcessConverter<'c> {
    pub(crate) fn new(context: &'c mut ParseContext) -> Self {
        Self {
            context,
            default_sequence_flow_ids: HashSet::new(),
            parentless_ids_by_process: HashMap::new(),
            process_calls: Vec::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    /// Convert every process of `definitions`, then run the final checks.
    pub(crate) fn deserialize(mut self, definitions: &JsonElement<'_>) {
        for process in definitions.children("process", false) {
            self.convert_process(&process);
        }

        debug!("Resolving references across processes");
        self.assign_called_process_parents();
        self.check_parents();
        self.check_flow_ends();
        self.link_flows();
    }

    fn convert_process(&mut self, process: &JsonElement<'_>) {
        let Some(process_id) = process.id() else {
            self.context.warn(
                Diagnostic::warning("process without `id` is ignored").with_code(ErrorCode::W100),
            );
            return;
        };
        let parent_id = self
            .context
            .registry
            .find_participant_by_process_ref(&process_id)
            .map(|participant| participant.id().to_string());
        info!(process_id, parent_id:?; "Converting process");

        let scope = Scope {
            process_id: &process_id,
            parent_id: parent_id.as_deref(),
            is_top_level: true,
            is_event_sub_process: false,
        };
        self.convert_scope(process, scope);
    }

    /// Convert the content of a process or sub-process.
    fn convert_scope(&mut self, container: &JsonElement<'_>, scope: Scope<'_>) {
        self.convert_flow_nodes(container, scope);
        self.convert_lane_sets(container, "laneSet", scope.parent_id);
        artifact::convert_artifacts(container, scope.parent_id, self.context);
        self.convert_sequence_flows(container);
    }

    // ============================================================================
    // Flow Nodes
    // ============================================================================

    fn convert_flow_nodes(&mut self, container: &JsonElement<'_>, scope: Scope<'_>) {
        for kind in ShapeBpmnElementKind::TASKS {
            for task in container.children(kind.as_str(), false) {
                let result = self.build_task(&task, kind, scope);
                self.register_flow_node(&task, result, scope);
            }
        }

        for call_activity in container.children("callActivity", false) {
            let result = self.build_call_activity(&call_activity, scope);
            self.register_flow_node(&call_activity, result, scope);
        }

        for (field, sub_process_kind) in SUB_PROCESS_FIELDS {
            for sub_process in container.children(field, false) {
                self.convert_sub_process(&sub_process, sub_process_kind, scope);
            }
        }

        for kind in ShapeBpmnElementKind::GATEWAYS {
            for gateway in container.children(kind.as_str(), false) {
                let result = self.build_gateway(&gateway, kind, scope);
                self.register_flow_node(&gateway, result, scope);
            }
        }

        for kind in ShapeBpmnElementKind::EVENTS {
            if kind == ShapeBpmnElementKind::BoundaryEvent {
                continue;
            }
            for event in container.children(kind.as_str(), false) {
                let result = self.build_event(&event, kind, scope);
                self.register_flow_node(&event, result, scope);
            }
        }

        for kind in DATA_KINDS {
            for data in container.children(kind.as_str(), false) {
                let result = shape(&data, kind, scope.parent_id);
                self.register_flow_node(&data, result, scope);
            }
        }

        // Boundary events last: they resolve the activity they are attached to.
        for event in container.children("boundaryEvent", false) {
            let result = self.build_boundary_event(&event);
            self.register_flow_node(&event, result, scope);
        }
    }

    fn register_flow_node(
        &mut self,
        element: &JsonElement<'_>,
        result: Result<ShapeBpmnElement>,
        scope: Scope<'_>,
    ) {
        match result {
            Ok(shape) => {
                trace!(id = shape.id(), kind:% = shape.kind(); "Registering flow node");
                if scope.is_top_level && shape.parent_id().is_none() {
                    self.parentless_ids_by_process
                        .entry(scope.process_id.to_string())
                        .or_default()
                        .push(shape.id().to_string());
                }
                self.context.registry.register_flow_node(shape);
            }
            Err(diagnostic) => self.context.reject(element.id().as_deref(), diagnostic),
        }
    }

    fn build_task(
        &mut self,
        task: &JsonElement<'_>,
        kind: ShapeBpmnElementKind,
        scope: Scope<'_>,
    ) -> Result<ShapeBpmnElement> {
        self.record_default(task);
        let markers = activity_markers(task);
        Ok(shape(task, kind, scope.parent_id)?.with_details(ShapeDetails::Activity { markers }))
    }

    fn build_call_activity(
        &mut self,
        call_activity: &JsonElement<'_>,
        scope: Scope<'_>,
    ) -> Result<ShapeBpmnElement> {
        self.record_default(call_activity);
        let element = shape(call_activity, ShapeBpmnElementKind::CallActivity, scope.parent_id)?;
        let called_element = call_activity.attr("calledElement").unwrap_or_default();
        let registry = &self.context.registry;

        let (call_activity_kind, global_task_kind) =
            if registry.find_process_by_id(&called_element).is_some() {
                self.process_calls
                    .push((element.id().to_string(), called_element.clone()));
                (CallActivityKind::CallingProcess, None)
            } else if let Some(global_task_kind) = registry.find_global_task_by_id(&called_element) {
                (CallActivityKind::CallingGlobalTask, Some(global_task_kind))
            } else {
                return Err(Diagnostic::warning(format!(
                    "call activity `{}` calls unknown element `{called_element}`",
                    element.id()
                ))
                .with_code(ErrorCode::W100)
                .with_label(element.id(), "unresolved `calledElement`")
                .with_help("`calledElement` must name a process or a global task"));
            };

        debug!(
            id = element.id(),
            called_element,
            call_activity_kind:?;
            "Resolved call activity"
        );
        Ok(element.with_details(ShapeDetails::CallActivity {
            call_activity_kind,
            called_element,
            global_task_kind,
            called_task_kind: global_task_kind.map(GlobalTaskKind::task_kind),
            markers: activity_markers(call_activity),
        }))
    }

    fn convert_sub_process(
        &mut self,
        sub_process: &JsonElement<'_>,
        field_kind: SubProcessKind,
        scope: Scope<'_>,
    ) {
        self.record_default(sub_process);
        let sub_process_kind = match field_kind {
            SubProcessKind::Embedded if sub_process.attr_bool("triggeredByEvent") == Some(true) => {
                SubProcessKind::Event
            }
            kind => kind,
        };
        let mut markers = activity_markers(sub_process);
        if sub_process_kind == SubProcessKind::AdHoc {
            markers.push(MarkerKind::AdHoc);
        }

        let element = match shape(sub_process, ShapeBpmnElementKind::SubProcess, scope.parent_id) {
            Ok(element) => element.with_details(ShapeDetails::SubProcess {
                sub_process_kind,
                markers,
            }),
            Err(diagnostic) => return self.register_flow_node(sub_process, Err(diagnostic), scope),
        };

        let id = element.id().to_string();
        debug!(id, sub_process_kind:?; "Converting sub-process");
        self.register_flow_node(sub_process, Ok(element), scope);

        let inner = Scope {
            process_id: scope.process_id,
            parent_id: Some(id.as_str()),
            is_top_level: false,
            is_event_sub_process: sub_process_kind == SubProcessKind::Event,
        };
        self.convert_scope(sub_process, inner);
    }

    fn build_gateway(
        &mut self,
        gateway: &JsonElement<'_>,
        kind: ShapeBpmnElementKind,
        scope: Scope<'_>,
    ) -> Result<ShapeBpmnElement> {
        self.record_default(gateway);
        let element = shape(gateway, kind, scope.parent_id)?;
        if kind != ShapeBpmnElementKind::EventBasedGateway {
            return Ok(element);
        }

        let gateway_kind = gateway
            .attr("eventGatewayType")
            .and_then(|value| value.parse::<EventBasedGatewayKind>().ok())
            .unwrap_or_default();
        Ok(element.with_details(ShapeDetails::EventBasedGateway {
            instantiate: gateway.attr_bool("instantiate").unwrap_or(false),
            gateway_kind,
        }))
    }

    fn build_event(
        &self,
        event: &JsonElement<'_>,
        kind: ShapeBpmnElementKind,
        scope: Scope<'_>,
    ) -> Result<ShapeBpmnElement> {
        let element = shape(event, kind, scope.parent_id)?;
        let event_definition_kind = self.event_definition_kind(event, element.id())?;

        let details = if kind == ShapeBpmnElementKind::StartEvent {
            let is_interrupting = scope
                .is_event_sub_process
                .then(|| event.attr_bool("isInterrupting").unwrap_or(true));
            ShapeDetails::StartEvent {
                event_definition_kind,
                is_interrupting,
            }
        } else {
            ShapeDetails::Event {
                event_definition_kind,
            }
        };
        Ok(element.with_details(details))
    }

    /// Build a boundary event. Its parent is the activity it is attached to.
    fn build_boundary_event(&self, event: &JsonElement<'_>) -> Result<ShapeBpmnElement> {
        let id = required_id(event, "boundary event")?;
        let event_definition_kind = self.event_definition_kind(event, &id)?;
        if event_definition_kind == EventDefinitionKind::None {
            return Err(Diagnostic::warning(format!(
                "boundary event `{id}` has no event definition"
            ))
            .with_code(ErrorCode::W100)
            .with_label(id, "boundary event without event definition")
            .with_help("boundary events need exactly one event definition"));
        }

        let attached_to_ref = event.attr("attachedToRef");
        let attached_to = attached_to_ref
            .as_deref()
            .and_then(|attached| self.context.registry.find_flow_node_by_id(attached));
        match attached_to {
            Some(activity) if activity.kind().is_activity() => {}
            other => {
                let mut diagnostic = Diagnostic::warning(format!(
                    "boundary event `{id}` is not attached to an activity"
                ))
                .with_code(ErrorCode::W102)
                .with_label(id.as_str(), "boundary event");
                if let Some(attached) = attached_to_ref.as_deref() {
                    let message = match other {
                        Some(element) => format!("attached to this {}", element.kind()),
                        None => "unknown element".to_string(),
                    };
                    diagnostic = diagnostic.with_secondary_label(attached, message);
                }
                return Err(diagnostic.with_help(
                    "`attachedToRef` must name a task, a sub-process or a call activity",
                ));
            }
        }

        let mut element = ShapeBpmnElement::new(
            id,
            event.name(),
            ShapeBpmnElementKind::BoundaryEvent,
            attached_to_ref,
        )
        .with_details(ShapeDetails::BoundaryEvent {
            event_definition_kind,
            is_interrupting: event.attr_bool("cancelActivity").unwrap_or(true),
        });
        add_flow_refs(&mut element, event);
        Ok(element)
    }

    /// Determine the event definition kind of an event.
    ///
    /// Exactly one definition is accepted, embedded or referenced through
    /// `eventDefinitionRef`. An event with none has [`EventDefinitionKind::None`].
    fn event_definition_kind(&self, event: &JsonElement<'_>, id: &str) -> Result<EventDefinitionKind> {
        let mut embedded = Vec::new();
        for kind in EventDefinitionKind::DEFINED {
            if let Some(field) = kind.definition_field() {
                let count = event.children(field, true).len();
                embedded.extend(std::iter::repeat_n(kind, count));
            }
        }
        let references = event.refs("eventDefinitionRef");

        match (embedded.as_slice(), references.as_slice()) {
            ([], []) => Ok(EventDefinitionKind::None),
            ([kind], []) => Ok(*kind),
            ([], [reference]) => self
                .context
                .registry
                .find_event_definition_kind_by_id(reference)
                .ok_or_else(|| {
                    Diagnostic::warning(format!(
                        "event `{id}` references unknown event definition `{reference}`"
                    ))
                    .with_code(ErrorCode::W100)
                    .with_label(id, "unresolved `eventDefinitionRef`")
                    .with_help("declare the event definition at the root of the document")
                }),
            _ => Err(Diagnostic::warning(format!(
                "event `{id}` has {} event definitions",
                embedded.len() + references.len()
            ))
            .with_code(ErrorCode::W100)
            .with_label(id, "ambiguous event definition")
            .with_help(
                "keep a single event definition, either embedded or through `eventDefinitionRef`",
            )),
        }
    }

    fn record_default(&mut self, element: &JsonElement<'_>) {
        if let Some(default) = element.attr("default") {
            self.default_sequence_flow_ids.insert(default);
        }
    }

    // ============================================================================
    // Lanes
    // ============================================================================

    fn convert_lane_sets(&mut self, container: &JsonElement<'_>, field: &str, parent_id: Option<&str>) {
        for lane_set in container.children(field, false) {
            for lane in lane_set.children("lane", false) {
                self.convert_lane(&lane, parent_id);
            }
        }
    }

    fn convert_lane(&mut self, lane: &JsonElement<'_>, parent_id: Option<&str>) {
        let id = match required_id(lane, "lane") {
            Ok(id) => id,
            Err(diagnostic) => return self.context.reject(None, diagnostic),
        };
        debug!(id, parent_id:?; "Registering lane");
        self.context.registry.register_lane(ShapeBpmnElement::new(
            id.as_str(),
            lane.name(),
            ShapeBpmnElementKind::Lane,
            parent_id.map(str::to_string),
        ));

        for flow_node_ref in lane.refs("flowNodeRef") {
            match self.context.registry.find_flow_node_mut(&flow_node_ref) {
                Some(flow_node) if flow_node.kind() == ShapeBpmnElementKind::BoundaryEvent => {}
                Some(flow_node) => flow_node.set_parent_id(Some(id.clone())),
                None => self.context.warn(
                    Diagnostic::warning(format!(
                        "lane `{id}` references unknown flow node `{flow_node_ref}`"
                    ))
                    .with_code(ErrorCode::W103)
                    .with_label(id.as_str(), "lane with unknown flowNodeRef")
                    .with_help("remove the reference or declare the flow node in the process"),
                ),
            }
        }

        self.convert_lane_sets(lane, "childLaneSet", Some(id.as_str()));
    }

    // ============================================================================
    // Sequence Flows
    // ============================================================================

    fn convert_sequence_flows(&mut self, container: &JsonElement<'_>) {
        for sequence_flow in container.children("sequenceFlow", false) {
            match self.build_sequence_flow(&sequence_flow) {
                Ok(flow) => {
                    trace!(flow:%; "Registering sequence flow");
                    self.context.registry.register_sequence_flow(flow);
                }
                Err(diagnostic) => self
                    .context
                    .reject(sequence_flow.id().as_deref(), diagnostic),
            }
        }
    }

    fn build_sequence_flow(&self, sequence_flow: &JsonElement<'_>) -> Result<Flow> {
        let id = required_id(sequence_flow, "sequence flow")?;
        let (source_ref, target_ref) = flow_ends(sequence_flow, &id)?;

        let sequence_flow_kind = if self.default_sequence_flow_ids.contains(&id) {
            SequenceFlowKind::Default
        } else if sequence_flow.has("conditionExpression") {
            let source_kind = self
                .context
                .registry
                .find_flow_node_by_id(&source_ref)
                .map(ShapeBpmnElement::kind);
            match source_kind {
                Some(kind) if kind.is_gateway() => SequenceFlowKind::ConditionalFromGateway,
                Some(kind) if kind.is_activity() => SequenceFlowKind::ConditionalFromActivity,
                _ => SequenceFlowKind::Normal,
            }
        } else {
            SequenceFlowKind::Normal
        };

        Ok(Flow::new(
            id,
            sequence_flow.name(),
            FlowKind::SequenceFlow { sequence_flow_kind },
            source_ref,
            target_ref,
        ))
    }

    // ============================================================================
    // Final Checks
    // ============================================================================

    /// Place the parentless top-level elements of a called process inside
    /// the call activity that calls it.
    ///
    /// An element enclosing the call activity keeps no parent, so recursive
    /// and mutual calls never close a parent cycle.
    fn assign_called_process_parents(&mut self) {
        for (call_activity_id, process_id) in mem::take(&mut self.process_calls) {
            let Some(ids) = self.parentless_ids_by_process.get(&process_id) else {
                continue;
            };
            for id in ids {
                if encloses(&self.context.registry, id, &call_activity_id) {
                    debug!(
                        element_id = id.as_str(),
                        call_activity_id = call_activity_id.as_str();
                        "Recursive call keeps element parentless"
                    );
                    continue;
                }
                let Some(element) = self.context.registry.find_flow_node_mut(id) else {
                    continue;
                };
                if element.parent_id().is_none() {
                    element.set_parent_id(Some(call_activity_id.clone()));
                }
            }
        }
    }

    /// Clear parents that name no registered container.
    fn check_parents(&mut self) {
        let registry = &self.context.registry;
        let unknown: Vec<(String, String)> = registry
            .flow_nodes()
            .chain(registry.lanes())
            .filter_map(|element| {
                let parent_id = element.parent_id()?;
                (!registry.is_container(parent_id))
                    .then(|| (element.id().to_string(), parent_id.to_string()))
            })
            .collect();

        for (id, parent_id) in unknown {
            self.context.warn(
                Diagnostic::warning(format!("element `{id}` has unknown parent `{parent_id}`"))
                    .with_code(ErrorCode::W107)
                    .with_label(id.as_str(), "element drawn without container"),
            );
            if let Some(element) = self.context.registry.find_shape_element_mut(&id) {
                element.set_parent_id(None);
            }
        }
    }

    /// Drop flows whose source or target is unknown.
    fn check_flow_ends(&mut self) {
        let registry = &self.context.registry;
        let dangling: Vec<(String, String)> = registry
            .flows()
            .filter_map(|flow| {
                [flow.source_ref(), flow.target_ref()]
                    .into_iter()
                    .find(|end| !registry.is_known_element(end))
                    .map(|end| (flow.id().to_string(), end.to_string()))
            })
            .collect();
        if dangling.is_empty() {
            return;
        }

        let dangling_ids: HashSet<&str> = dangling.iter().map(|(id, _)| id.as_str()).collect();
        self.context
            .registry
            .retain_flows(|flow| !dangling_ids.contains(flow.id()));

        for (id, end) in &dangling {
            self.context.reject(
                Some(id.as_str()),
                Diagnostic::warning(format!("flow `{id}` references unknown element `{end}`"))
                    .with_code(ErrorCode::W101)
                    .with_label(id.as_str(), "flow with unresolved end")
                    .with_secondary_label(end.as_str(), "unknown element"),
            );
        }
    }

    /// Record every remaining flow on the flow nodes it connects.
    fn link_flows(&mut self) {
        let links: Vec<(String, String, String)> = self
            .context
            .registry
            .flows()
            .map(|flow| {
                (
                    flow.id().to_string(),
                    flow.source_ref().to_string(),
                    flow.target_ref().to_string(),
                )
            })
            .collect();

        for (flow_id, source_ref, target_ref) in links {
            if let Some(source) = self.context.registry.find_flow_node_mut(&source_ref) {
                source.add_outgoing_id(&flow_id);
            }
            if let Some(target) = self.context.registry.find_flow_node_mut(&target_ref) {
                target.add_incoming_id(&flow_id);
            }
        }
    }
}

/// Build the element common to every flow node, with declared flow refs.
fn shape(
    element: &JsonElement<'_>,
    kind: ShapeBpmnElementKind,
    parent_id: Option<&str>,
) -> Result<ShapeBpmnElement> {
    let id = required_id(element, kind.as_str())?;
    let mut shape = ShapeBpmnElement::new(id, element.name(), kind, parent_id.map(str::to_string));
    add_flow_refs(&mut shape, element);
    Ok(shape)
}

fn add_flow_refs(shape: &mut ShapeBpmnElement, element: &JsonElement<'_>) {
    for incoming in element.refs("incoming") {
        shape.add_incoming_id(&incoming);
    }
    for outgoing in element.refs("outgoing") {
        shape.add_outgoing_id(&outgoing);
    }
}

/// Markers declared by the loop characteristics and compensation flag.
fn activity_markers(activity: &JsonElement<'_>) -> Vec<MarkerKind> {
    let mut markers = Vec::new();
    if activity.has("standardLoopCharacteristics") {
        markers.push(MarkerKind::Loop);
    }
    if let Some(multi_instance) = activity.child("multiInstanceLoopCharacteristics") {
        if multi_instance.attr_bool("isSequential") == Some(true) {
            markers.push(MarkerKind::MultiInstanceSequential);
        } else {
            markers.push(MarkerKind::MultiInstanceParallel);
        }
    }
    if activity.attr_bool("isForCompensation") == Some(true) {
        markers.push(MarkerKind::Compensation);
    }
    markers
}

/// Returns `true` if `ancestor_id` is `id` or one of its parents.
fn encloses(registry: &ConvertedElements, ancestor_id: &str, id: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(id);
    while let Some(current_id) = current {
        if current_id == ancestor_id {
            return true;
        }
        if !visited.insert(current_id) {
            return false;
        }
        current = registry
            .find_flow_node_by_id(current_id)
            .or_else(|| registry.find_lane_by_id(current_id))
            .and_then(ShapeBpmnElement::parent_id);
    }
    false
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{converter::root_element, registry::Participant};

    fn convert(definitions: &Value) -> ParseContext {
        let mut context = ParseContext::new(false);
        let definitions = JsonElement::borrowed(definitions);
        root_element::deserialize(&definitions, &mut context.registry);
        ProcessConverter::new(&mut context).deserialize(&definitions);
        context
    }

    fn codes(context: &ParseContext) -> Vec<ErrorCode> {
        context
            .collector
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_tasks_with_markers() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "userTask": {
                    "id": "t1",
                    "name": "Review",
                    "standardLoopCharacteristics": "",
                    "isForCompensation": "true",
                },
                "task": {
                    "id": "t2",
                    "multiInstanceLoopCharacteristics": { "isSequential": "true" },
                },
            },
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        let review = registry.find_flow_node_by_id("t1").unwrap();
        assert_eq!(review.kind(), ShapeBpmnElementKind::UserTask);
        assert_eq!(review.name(), Some("Review"));
        assert_eq!(review.markers(), [MarkerKind::Loop, MarkerKind::Compensation]);

        let task = registry.find_flow_node_by_id("t2").unwrap();
        assert_eq!(task.markers(), [MarkerKind::MultiInstanceSequential]);
        assert_eq!(task.parent_id(), None);
    }

    #[test]
    fn test_boundary_event_interrupting() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1" },
                "boundaryEvent": [
                    { "id": "b1", "attachedToRef": "t1", "timerEventDefinition": "" },
                    {
                        "id": "b2",
                        "attachedToRef": "t1",
                        "cancelActivity": "false",
                        "messageEventDefinition": { "id": "md1" },
                    },
                ],
            },
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        let interrupting = registry.find_flow_node_by_id("b1").unwrap();
        assert_eq!(interrupting.kind(), ShapeBpmnElementKind::BoundaryEvent);
        assert_eq!(interrupting.parent_id(), Some("t1"));
        assert_eq!(interrupting.is_interrupting(), Some(true));
        assert_eq!(
            interrupting.event_definition_kind(),
            Some(EventDefinitionKind::Timer)
        );

        let non_interrupting = registry.find_flow_node_by_id("b2").unwrap();
        assert_eq!(non_interrupting.is_interrupting(), Some(false));
        assert!(codes(&context).is_empty());
    }

    #[test]
    fn test_boundary_event_not_attached_to_activity() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "exclusiveGateway": { "id": "g1" },
                "boundaryEvent": [
                    { "id": "b1", "attachedToRef": "g1", "timerEventDefinition": "" },
                    { "id": "b2", "attachedToRef": "missing", "timerEventDefinition": "" },
                    { "id": "b3", "timerEventDefinition": "" },
                ],
            },
        });
        let context = convert(&definitions);

        for id in ["b1", "b2", "b3"] {
            assert!(context.registry.find_flow_node_by_id(id).is_none());
            assert!(context.is_rejected(id));
        }
        assert_eq!(codes(&context), [ErrorCode::W102; 3]);
        let labels = context.collector.diagnostics()[0].labels();
        assert_eq!(labels[1].element_id(), "g1");
        assert_eq!(labels[1].message(), "attached to this exclusiveGateway");
    }

    #[test]
    fn test_boundary_event_without_definition() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1" },
                "boundaryEvent": { "id": "b1", "attachedToRef": "t1" },
            },
        });
        let context = convert(&definitions);

        assert!(context.registry.find_flow_node_by_id("b1").is_none());
        assert_eq!(codes(&context), [ErrorCode::W100]);
    }

    #[test]
    fn test_event_definition_resolution() {
        let mut context = ParseContext::new(false);
        context
            .registry
            .register_event_definition("shared_signal", EventDefinitionKind::Signal);
        let definitions = json!({
            "process": {
                "id": "p1",
                "startEvent": { "id": "s1" },
                "endEvent": [
                    { "id": "e1", "terminateEventDefinition": "" },
                    { "id": "e2", "eventDefinitionRef": "shared_signal" },
                    { "id": "e3", "eventDefinitionRef": "missing" },
                    { "id": "e4", "messageEventDefinition": "", "eventDefinitionRef": "shared_signal" },
                    { "id": "e5", "messageEventDefinition": "", "timerEventDefinition": "" },
                    { "id": "e6", "messageEventDefinition": ["", ""] },
                ],
            },
        });
        let definitions = JsonElement::borrowed(&definitions);
        root_element::deserialize(&definitions, &mut context.registry);
        ProcessConverter::new(&mut context).deserialize(&definitions);

        let kind_of = |id: &str| {
            context
                .registry
                .find_flow_node_by_id(id)
                .and_then(ShapeBpmnElement::event_definition_kind)
        };
        assert_eq!(kind_of("s1"), Some(EventDefinitionKind::None));
        assert_eq!(kind_of("e1"), Some(EventDefinitionKind::Terminate));
        assert_eq!(kind_of("e2"), Some(EventDefinitionKind::Signal));
        for rejected in ["e3", "e4", "e5", "e6"] {
            assert_eq!(kind_of(rejected), None);
        }

        let rejected_ids: Vec<_> = context
            .collector
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::element_id)
            .collect();
        assert_eq!(rejected_ids, ["e3", "e4", "e5", "e6"]);
    }

    #[test]
    fn test_call_activities() {
        let definitions = json!({
            "globalUserTask": { "id": "gut1" },
            "process": [
                {
                    "id": "main",
                    "callActivity": [
                        { "id": "ca1", "calledElement": "gut1" },
                        { "id": "ca2", "calledElement": "sub" },
                        { "id": "ca3", "calledElement": "nowhere" },
                    ],
                },
                { "id": "sub", "task": { "id": "sub_task" } },
            ],
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        let global = registry.find_flow_node_by_id("ca1").unwrap();
        assert_eq!(global.kind(), ShapeBpmnElementKind::CallActivity);
        assert_eq!(
            global.call_activity_kind(),
            Some(CallActivityKind::CallingGlobalTask)
        );
        assert_eq!(global.global_task_kind(), Some(GlobalTaskKind::GlobalUserTask));
        assert_eq!(global.called_task_kind(), Some(ShapeBpmnElementKind::UserTask));

        let process_call = registry.find_flow_node_by_id("ca2").unwrap();
        assert_eq!(
            process_call.call_activity_kind(),
            Some(CallActivityKind::CallingProcess)
        );
        assert_eq!(
            registry
                .find_flow_node_by_id("sub_task")
                .and_then(ShapeBpmnElement::parent_id),
            Some("ca2")
        );

        assert!(registry.find_flow_node_by_id("ca3").is_none());
        assert_eq!(codes(&context), [ErrorCode::W100]);
    }

    #[test]
    fn test_recursive_call_keeps_call_activity_parentless() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "callActivity": { "id": "ca1", "calledElement": "p1" },
                "task": { "id": "t1" },
            },
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        assert_eq!(
            registry.find_flow_node_by_id("ca1").and_then(ShapeBpmnElement::parent_id),
            None
        );
        assert_eq!(
            registry.find_flow_node_by_id("t1").and_then(ShapeBpmnElement::parent_id),
            Some("ca1")
        );
        assert!(codes(&context).is_empty());
    }

    #[test]
    fn test_mutual_calls_do_not_form_parent_cycle() {
        let definitions = json!({
            "process": [
                { "id": "p2", "callActivity": { "id": "ca2", "calledElement": "p3" } },
                { "id": "p3", "callActivity": { "id": "ca3", "calledElement": "p2" } },
            ],
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        assert_eq!(
            registry.find_flow_node_by_id("ca3").and_then(ShapeBpmnElement::parent_id),
            Some("ca2")
        );
        assert_eq!(
            registry.find_flow_node_by_id("ca2").and_then(ShapeBpmnElement::parent_id),
            None
        );
        assert!(codes(&context).is_empty());
    }

    #[test]
    fn test_unknown_parent_is_cleared() {
        let mut context = ParseContext::new(false);
        context.registry.register_flow_node(ShapeBpmnElement::new(
            "t1",
            None,
            ShapeBpmnElementKind::Task,
            Some("ghost".to_string()),
        ));
        context.registry.register_flow_node(ShapeBpmnElement::new(
            "t2",
            None,
            ShapeBpmnElementKind::Task,
            Some("t1".to_string()),
        ));

        ProcessConverter::new(&mut context).check_parents();

        let registry = &context.registry;
        assert_eq!(
            registry.find_flow_node_by_id("t1").and_then(ShapeBpmnElement::parent_id),
            None
        );
        assert_eq!(
            registry.find_flow_node_by_id("t2").and_then(ShapeBpmnElement::parent_id),
            Some("t1")
        );
        assert_eq!(codes(&context), [ErrorCode::W107]);
        assert_eq!(
            context.collector.diagnostics()[0].element_id(),
            Some("t1")
        );
    }

    #[test]
    fn test_sub_process_children() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "subProcess": {
                    "id": "sp1",
                    "triggeredByEvent": "true",
                    "startEvent": { "id": "sp_start", "isInterrupting": "false", "messageEventDefinition": "" },
                    "task": { "id": "sp_task" },
                    "sequenceFlow": { "id": "sp_flow", "sourceRef": "sp_start", "targetRef": "sp_task" },
                },
                "adHocSubProcess": { "id": "adhoc1" },
                "transaction": { "id": "tx1" },
            },
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        let sub_process = registry.find_flow_node_by_id("sp1").unwrap();
        assert_eq!(sub_process.sub_process_kind(), Some(SubProcessKind::Event));

        let start = registry.find_flow_node_by_id("sp_start").unwrap();
        assert_eq!(start.parent_id(), Some("sp1"));
        assert_eq!(start.is_interrupting(), Some(false));
        assert_eq!(start.outgoing_ids(), ["sp_flow"]);
        assert_eq!(
            registry
                .find_flow_node_by_id("sp_task")
                .map(ShapeBpmnElement::incoming_ids),
            Some(&["sp_flow".to_string()][..])
        );

        let adhoc = registry.find_flow_node_by_id("adhoc1").unwrap();
        assert_eq!(adhoc.sub_process_kind(), Some(SubProcessKind::AdHoc));
        assert_eq!(adhoc.markers(), [MarkerKind::AdHoc]);
        assert_eq!(
            registry
                .find_flow_node_by_id("tx1")
                .and_then(ShapeBpmnElement::sub_process_kind),
            Some(SubProcessKind::Transaction)
        );
    }

    #[test]
    fn test_event_based_gateway() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "eventBasedGateway": { "id": "g1", "instantiate": "true", "eventGatewayType": "Parallel" },
            },
        });
        let context = convert(&definitions);

        assert_eq!(
            context.registry.find_flow_node_by_id("g1").map(ShapeBpmnElement::details),
            Some(&ShapeDetails::EventBasedGateway {
                instantiate: true,
                gateway_kind: EventBasedGatewayKind::Parallel,
            })
        );
    }

    #[test]
    fn test_sequence_flow_kinds() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1", "default": "f_default_task" },
                "exclusiveGateway": { "id": "g1", "default": "f_default" },
                "endEvent": { "id": "e1" },
                "sequenceFlow": [
                    { "id": "f_default", "sourceRef": "g1", "targetRef": "e1" },
                    { "id": "f_cond_gw", "sourceRef": "g1", "targetRef": "t1",
                      "conditionExpression": { "#text": "${ok}" } },
                    { "id": "f_cond_task", "sourceRef": "t1", "targetRef": "e1",
                      "conditionExpression": "" },
                    { "id": "f_default_task", "sourceRef": "t1", "targetRef": "g1" },
                    { "id": "f_normal", "sourceRef": "e1", "targetRef": "t1" },
                ],
            },
        });
        let context = convert(&definitions);

        let kind_of = |id: &str| {
            context
                .registry
                .find_sequence_flow_by_id(id)
                .and_then(Flow::sequence_flow_kind)
        };
        assert_eq!(kind_of("f_default"), Some(SequenceFlowKind::Default));
        assert_eq!(kind_of("f_cond_gw"), Some(SequenceFlowKind::ConditionalFromGateway));
        assert_eq!(kind_of("f_cond_task"), Some(SequenceFlowKind::ConditionalFromActivity));
        assert_eq!(kind_of("f_default_task"), Some(SequenceFlowKind::Default));
        assert_eq!(kind_of("f_normal"), Some(SequenceFlowKind::Normal));
    }

    #[test]
    fn test_default_matches_exact_id_only() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "exclusiveGateway": { "id": "g1", "default": " f1" },
                "task": { "id": "t1" },
                "sequenceFlow": { "id": "f1", "sourceRef": "g1", "targetRef": "t1" },
            },
        });
        let context = convert(&definitions);

        assert_eq!(
            context
                .registry
                .find_sequence_flow_by_id("f1")
                .and_then(Flow::sequence_flow_kind),
            Some(SequenceFlowKind::Normal)
        );
    }

    #[test]
    fn test_lane_with_unknown_flow_node_ref() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1" },
                "laneSet": {
                    "id": "ls1",
                    "lane": {
                        "id": "lane_1",
                        "name": "Sales",
                        "flowNodeRef": ["t1", "ghost"],
                        "childLaneSet": { "lane": { "id": "lane_1_1" } },
                    },
                },
            },
        });
        let context = convert(&definitions);
        let registry = &context.registry;

        assert_eq!(
            registry.find_lane_by_id("lane_1").and_then(ShapeBpmnElement::name),
            Some("Sales")
        );
        assert_eq!(
            registry
                .find_lane_by_id("lane_1_1")
                .and_then(ShapeBpmnElement::parent_id),
            Some("lane_1")
        );
        assert_eq!(
            registry
                .find_flow_node_by_id("t1")
                .and_then(ShapeBpmnElement::parent_id),
            Some("lane_1")
        );
        assert_eq!(codes(&context), [ErrorCode::W103]);
    }

    #[test]
    fn test_lane_keeps_boundary_event_parent() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1" },
                "boundaryEvent": { "id": "b1", "attachedToRef": "t1", "errorEventDefinition": "" },
                "laneSet": { "lane": { "id": "lane_1", "flowNodeRef": ["t1", "b1"] } },
            },
        });
        let context = convert(&definitions);

        assert_eq!(
            context
                .registry
                .find_flow_node_by_id("b1")
                .and_then(ShapeBpmnElement::parent_id),
            Some("t1")
        );
    }

    #[test]
    fn test_top_level_parent_is_participant() {
        let mut context = ParseContext::new(false);
        context.registry.register_participant(Participant::new(
            "pool_1",
            None,
            Some("p1".to_string()),
        ));
        let definitions = json!({ "process": { "id": "p1", "task": { "id": "t1" } } });
        let definitions = JsonElement::borrowed(&definitions);
        root_element::deserialize(&definitions, &mut context.registry);
        ProcessConverter::new(&mut context).deserialize(&definitions);

        assert_eq!(
            context
                .registry
                .find_flow_node_by_id("t1")
                .and_then(ShapeBpmnElement::parent_id),
            Some("pool_1")
        );
    }

    #[test]
    fn test_dangling_flow_is_dropped() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": { "id": "t1" },
                "sequenceFlow": [
                    { "id": "f1", "sourceRef": "t1", "targetRef": "ghost" },
                    { "id": "f2", "sourceRef": "t1" },
                ],
            },
        });
        let context = convert(&definitions);

        assert!(context.registry.find_sequence_flow_by_id("f1").is_none());
        assert!(context.registry.find_sequence_flow_by_id("f2").is_none());
        assert!(context.is_rejected("f1"));
        assert_eq!(codes(&context), [ErrorCode::W101, ErrorCode::W101]);
        assert!(
            context
                .registry
                .find_flow_node_by_id("t1")
                .is_some_and(|task| task.outgoing_ids().is_empty())
        );
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let definitions = json!({
            "process": {
                "id": "p1",
                "task": [{ "id": "t1", "name": "first" }, { "id": "t1", "name": "second" }],
            },
        });
        let context = convert(&definitions);

        assert_eq!(
            context
                .registry
                .find_flow_node_by_id("t1")
                .and_then(ShapeBpmnElement::name),
            Some("second")
        );
    }
}
