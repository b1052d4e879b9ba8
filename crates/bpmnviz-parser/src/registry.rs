//! Id-indexed lookup tables filled while a document is converted.
//!
//! BPMN elements reference each other by id and may do so before the target
//! is declared, across processes or from the collaboration. Converters
//! register every element as soon as it is classified and resolve references
//! through the `find_*` methods, which return `None` for anything unknown.
//!
//! Registration never validates: the last write for an id wins.

use std::collections::HashMap;

use indexmap::IndexMap;

use bpmnviz_core::semantic::{
    EventDefinitionKind, Flow, GlobalTaskKind, ShapeBpmnElement, ShapeBpmnElementKind,
};

/// A collaboration participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: String,
    name: Option<String>,
    process_ref: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: Option<String>, process_ref: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            process_ref,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Id of the process behind this participant. `None` for a black box pool.
    pub fn process_ref(&self) -> Option<&str> {
        self.process_ref.as_deref()
    }
}

/// A process declared at the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    id: String,
    name: Option<String>,
}

impl Process {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Lookup tables for one parse.
#[derive(Debug, Default)]
pub struct ConvertedElements {
    participants: IndexMap<String, Participant>,
    participant_ids_by_process_ref: HashMap<String, String>,
    processes: IndexMap<String, Process>,
    flow_nodes: IndexMap<String, ShapeBpmnElement>,
    lanes: IndexMap<String, ShapeBpmnElement>,
    sequence_flows: IndexMap<String, Flow>,
    message_flows: IndexMap<String, Flow>,
    association_flows: IndexMap<String, Flow>,
    event_definitions: HashMap<String, EventDefinitionKind>,
    category_values: HashMap<String, Option<String>>,
    global_tasks: HashMap<String, GlobalTaskKind>,
}

impl ConvertedElements {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Participants and processes
    // ============================================================================

    pub fn register_participant(&mut self, participant: Participant) {
        if let Some(process_ref) = participant.process_ref() {
            self.participant_ids_by_process_ref
                .insert(process_ref.to_string(), participant.id().to_string());
        }
        self.participants
            .insert(participant.id().to_string(), participant);
    }

    pub fn find_participant_by_id(&self, id: &str) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Find the participant whose `processRef` names the process `process_id`.
    pub fn find_participant_by_process_ref(&self, process_id: &str) -> Option<&Participant> {
        self.participant_ids_by_process_ref
            .get(process_id)
            .and_then(|id| self.participants.get(id))
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn register_process(&mut self, process: Process) {
        self.processes.insert(process.id().to_string(), process);
    }

    pub fn find_process_by_id(&self, id: &str) -> Option<&Process> {
        self.processes.get(id)
    }

    /// Synthesize the pool drawn for a participant.
    ///
    /// The pool takes the participant name, else the name of the process it
    /// references. A participant whose process is unknown is a black box
    /// pool. An id naming a process directly yields a pool for that process.
    pub fn find_process_element(&self, participant_id: &str) -> Option<ShapeBpmnElement> {
        if let Some(participant) = self.participants.get(participant_id) {
            let process_name = participant
                .process_ref()
                .and_then(|process_ref| self.processes.get(process_ref))
                .and_then(|process| process.name.clone());
            let name = participant.name.clone().or(process_name);
            return Some(ShapeBpmnElement::new(
                participant.id(),
                name,
                ShapeBpmnElementKind::Pool,
                None,
            ));
        }

        self.processes.get(participant_id).map(|process| {
            ShapeBpmnElement::new(
                process.id(),
                process.name.clone(),
                ShapeBpmnElementKind::Pool,
                None,
            )
        })
    }

    // ============================================================================
    // Flow nodes and lanes
    // ============================================================================

    pub fn register_flow_node(&mut self, element: ShapeBpmnElement) {
        self.flow_nodes.insert(element.id().to_string(), element);
    }

    pub fn find_flow_node_by_id(&self, id: &str) -> Option<&ShapeBpmnElement> {
        self.flow_nodes.get(id)
    }

    pub(crate) fn find_flow_node_mut(&mut self, id: &str) -> Option<&mut ShapeBpmnElement> {
        self.flow_nodes.get_mut(id)
    }

    /// Flow nodes and artifacts in registration order.
    pub fn flow_nodes(&self) -> impl Iterator<Item = &ShapeBpmnElement> {
        self.flow_nodes.values()
    }

    pub fn register_lane(&mut self, lane: ShapeBpmnElement) {
        self.lanes.insert(lane.id().to_string(), lane);
    }

    pub fn find_lane_by_id(&self, id: &str) -> Option<&ShapeBpmnElement> {
        self.lanes.get(id)
    }

    pub fn lanes(&self) -> impl Iterator<Item = &ShapeBpmnElement> {
        self.lanes.values()
    }

    /// Find a flow node, else a lane, for update.
    pub(crate) fn find_shape_element_mut(&mut self, id: &str) -> Option<&mut ShapeBpmnElement> {
        match self.flow_nodes.get_mut(id) {
            Some(element) => Some(element),
            None => self.lanes.get_mut(id),
        }
    }

    /// Returns `true` if `id` names something that can contain elements: a
    /// flow node, a lane, a participant or a process.
    pub fn is_container(&self, id: &str) -> bool {
        self.flow_nodes.contains_key(id)
            || self.lanes.contains_key(id)
            || self.participants.contains_key(id)
            || self.processes.contains_key(id)
    }

    /// Returns `true` if `id` names a container or a flow.
    ///
    /// Associations may connect to flows, so flow ends are checked against
    /// this wider set.
    pub fn is_known_element(&self, id: &str) -> bool {
        self.is_container(id)
            || self.sequence_flows.contains_key(id)
            || self.message_flows.contains_key(id)
            || self.association_flows.contains_key(id)
    }

    // ============================================================================
    // Flows
    // ============================================================================

    pub fn register_sequence_flow(&mut self, flow: Flow) {
        self.sequence_flows.insert(flow.id().to_string(), flow);
    }

    pub fn find_sequence_flow_by_id(&self, id: &str) -> Option<&Flow> {
        self.sequence_flows.get(id)
    }

    pub fn register_message_flow(&mut self, flow: Flow) {
        self.message_flows.insert(flow.id().to_string(), flow);
    }

    pub fn find_message_flow_by_id(&self, id: &str) -> Option<&Flow> {
        self.message_flows.get(id)
    }

    pub fn register_association_flow(&mut self, flow: Flow) {
        self.association_flows.insert(flow.id().to_string(), flow);
    }

    pub fn find_association_flow_by_id(&self, id: &str) -> Option<&Flow> {
        self.association_flows.get(id)
    }

    /// All flows: sequence flows, then message flows, then associations.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.sequence_flows
            .values()
            .chain(self.message_flows.values())
            .chain(self.association_flows.values())
    }

    /// Keep only the flows for which `keep` returns `true`.
    pub(crate) fn retain_flows(&mut self, mut keep: impl FnMut(&Flow) -> bool) {
        self.sequence_flows.retain(|_, flow| keep(flow));
        self.message_flows.retain(|_, flow| keep(flow));
        self.association_flows.retain(|_, flow| keep(flow));
    }

    // ============================================================================
    // Root definitions
    // ============================================================================

    pub fn register_event_definition(&mut self, id: impl Into<String>, kind: EventDefinitionKind) {
        self.event_definitions.insert(id.into(), kind);
    }

    pub fn find_event_definition_kind_by_id(&self, id: &str) -> Option<EventDefinitionKind> {
        self.event_definitions.get(id).copied()
    }

    /// Register a category value and its text, if it has one.
    pub fn register_category_value(&mut self, id: impl Into<String>, value: Option<String>) {
        self.category_values.insert(id.into(), value);
    }

    /// Find a category value. The outer `None` means the id is unknown.
    pub fn find_category_value_by_id(&self, id: &str) -> Option<Option<&str>> {
        self.category_values.get(id).map(Option::as_deref)
    }

    pub fn register_global_task(&mut self, id: impl Into<String>, kind: GlobalTaskKind) {
        self.global_tasks.insert(id.into(), kind);
    }

    pub fn find_global_task_by_id(&self, id: &str) -> Option<GlobalTaskKind> {
        self.global_tasks.get(id).copied()
    }
}
