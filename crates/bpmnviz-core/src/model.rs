//! Renderable model: semantic elements merged with diagram-interchange data.
//!
//! A [`Shape`] wraps a [`ShapeBpmnElement`] with its bounds, an [`Edge`] wraps
//! a [`Flow`] with its waypoints. [`BpmnModel`] groups them the way a
//! rendering engine consumes them: pools, lanes, flow nodes, edges.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    geometry::{Bounds, Point},
    semantic::{Flow, ShapeBpmnElement, UnknownKindError},
};

/// Font of a label, from a `BPMNLabelStyle`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
    is_bold: bool,
    is_italic: bool,
    is_underline: bool,
    is_strike_through: bool,
}

impl Font {
    /// Create a regular font.
    pub fn new(name: Option<String>, size: Option<f64>) -> Self {
        Self {
            name,
            size,
            ..Self::default()
        }
    }

    /// Set the bold, italic, underline and strike-through flags.
    pub fn with_style(
        mut self,
        is_bold: bool,
        is_italic: bool,
        is_underline: bool,
        is_strike_through: bool,
    ) -> Self {
        self.is_bold = is_bold;
        self.is_italic = is_italic;
        self.is_underline = is_underline;
        self.is_strike_through = is_strike_through;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn size(&self) -> Option<f64> {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.is_bold
    }

    pub fn is_italic(&self) -> bool {
        self.is_italic
    }

    pub fn is_underline(&self) -> bool {
        self.is_underline
    }

    pub fn is_strike_through(&self) -> bool {
        self.is_strike_through
    }
}

/// Label of a shape or an edge.
///
/// Both parts are optional: a label may only override the font, only
/// position the text, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
}

impl Label {
    pub fn new(font: Option<Font>, bounds: Option<Bounds>) -> Self {
        Self { font, bounds }
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Returns `true` when the label carries neither font nor bounds.
    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.bounds.is_none()
    }
}

/// The `messageVisibleKind` of a message flow edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageVisibleKind {
    #[default]
    None,
    Initiating,
    NonInitiating,
}

impl FromStr for MessageVisibleKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiating" => Ok(Self::Initiating),
            "non_initiating" => Ok(Self::NonInitiating),
            _ => Err(UnknownKindError::new("message visible kind", s)),
        }
    }
}

/// A semantic element placed in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    id: String,
    bpmn_element: ShapeBpmnElement,
    bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_horizontal: Option<bool>,
}

impl Shape {
    /// Create a shape from its DI id, element and bounds.
    pub fn new(
        id: impl Into<String>,
        bpmn_element: ShapeBpmnElement,
        bounds: Bounds,
        label: Option<Label>,
    ) -> Self {
        Self {
            id: id.into(),
            bpmn_element,
            bounds,
            label,
            is_horizontal: None,
        }
    }

    /// Set the orientation of a pool or lane.
    pub fn with_horizontal(mut self, is_horizontal: Option<bool>) -> Self {
        self.is_horizontal = is_horizontal;
        self
    }

    /// Get the DI identifier of this shape.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bpmn_element(&self) -> &ShapeBpmnElement {
        &self.bpmn_element
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn is_horizontal(&self) -> Option<bool> {
        self.is_horizontal
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape `{}` of {}", self.id, self.bpmn_element)
    }
}

/// A flow routed through the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    id: String,
    bpmn_element: Flow,
    waypoints: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
    message_visible_kind: MessageVisibleKind,
}

impl Edge {
    /// Create an edge from its DI id, flow and waypoints.
    pub fn new(
        id: impl Into<String>,
        bpmn_element: Flow,
        waypoints: Vec<Point>,
        label: Option<Label>,
        message_visible_kind: MessageVisibleKind,
    ) -> Self {
        Self {
            id: id.into(),
            bpmn_element,
            waypoints,
            label,
            message_visible_kind,
        }
    }

    /// Get the DI identifier of this edge.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bpmn_element(&self) -> &Flow {
        &self.bpmn_element
    }

    /// Waypoints in drawing order.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn message_visible_kind(&self) -> MessageVisibleKind {
        self.message_visible_kind
    }
}

/// The result of parsing a BPMN document.
///
/// Shapes appear in the order their DI entries are declared. The model is
/// built once and only exposed through shared references afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnModel {
    pools: Vec<Shape>,
    lanes: Vec<Shape>,
    flow_nodes: Vec<Shape>,
    edges: Vec<Edge>,
}

impl BpmnModel {
    pub fn new(pools: Vec<Shape>, lanes: Vec<Shape>, flow_nodes: Vec<Shape>, edges: Vec<Edge>) -> Self {
        Self {
            pools,
            lanes,
            flow_nodes,
            edges,
        }
    }

    /// Shapes of collaboration participants.
    pub fn pools(&self) -> &[Shape] {
        &self.pools
    }

    pub fn lanes(&self) -> &[Shape] {
        &self.lanes
    }

    /// Shapes of flow nodes and artifacts.
    pub fn flow_nodes(&self) -> &[Shape] {
        &self.flow_nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Find a pool, lane or flow node shape by the id of its BPMN element.
    pub fn find_shape_by_element_id(&self, element_id: &str) -> Option<&Shape> {
        self.pools
            .iter()
            .chain(&self.lanes)
            .chain(&self.flow_nodes)
            .find(|shape| shape.bpmn_element().id() == element_id)
    }

    /// Find an edge by the id of its flow.
    pub fn find_edge_by_element_id(&self, element_id: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.bpmn_element().id() == element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{FlowKind, SequenceFlowKind, ShapeBpmnElementKind};

    fn task_shape() -> Shape {
        let element = ShapeBpmnElement::new("task_1", None, ShapeBpmnElementKind::Task, None);
        Shape::new("task_1_di", element, Bounds::new(10.0, 20.0, 100.0, 80.0), None)
    }

    fn sequence_edge() -> Edge {
        let flow = Flow::new(
            "flow_1",
            None,
            FlowKind::SequenceFlow {
                sequence_flow_kind: SequenceFlowKind::Normal,
            },
            "start_1",
            "task_1",
        );
        Edge::new(
            "flow_1_di",
            flow,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            None,
            MessageVisibleKind::None,
        )
    }

    #[test]
    fn test_message_visible_kind_from_str() {
        assert_eq!("initiating".parse(), Ok(MessageVisibleKind::Initiating));
        assert_eq!(
            "non_initiating".parse(),
            Ok(MessageVisibleKind::NonInitiating)
        );
        assert!("both".parse::<MessageVisibleKind>().is_err());
    }

    #[test]
    fn test_label_is_empty() {
        assert!(Label::default().is_empty());
        let label = Label::new(Some(Font::new(Some("Arial".to_string()), Some(11.0))), None);
        assert!(!label.is_empty());
        assert_eq!(label.font().and_then(Font::name), Some("Arial"));
    }

    #[test]
    fn test_font_style() {
        let font = Font::new(None, None).with_style(true, false, true, false);
        assert!(font.is_bold());
        assert!(!font.is_italic());
        assert!(font.is_underline());
        assert!(!font.is_strike_through());
    }

    #[test]
    fn test_model_lookups() {
        let model = BpmnModel::new(vec![], vec![], vec![task_shape()], vec![sequence_edge()]);
        assert_eq!(
            model.find_shape_by_element_id("task_1").map(Shape::id),
            Some("task_1_di")
        );
        assert!(model.find_shape_by_element_id("missing").is_none());
        assert_eq!(
            model.find_edge_by_element_id("flow_1").map(|edge| edge.waypoints().len()),
            Some(2)
        );
    }

    #[test]
    fn test_model_serialize_keys() {
        let model = BpmnModel::new(vec![], vec![], vec![task_shape()], vec![sequence_edge()]);
        let value = serde_json::to_value(&model).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["pools", "lanes", "flowNodes", "edges"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["flowNodes"][0]["bpmnElement"]["id"], "task_1");
        assert_eq!(value["edges"][0]["messageVisibleKind"], "none");
        assert_eq!(value["edges"][0]["waypoints"][1]["x"], 10.0);
    }
}
