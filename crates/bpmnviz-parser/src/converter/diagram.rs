//! Diagram interchange: geometry attached to the converted elements.
//!
//! Only the first `BPMNDiagram` is read. Every `BPMNShape` and `BPMNEdge` of
//! its plane is matched by `bpmnElement` against the registry; entries whose
//! element was rejected earlier are skipped silently, entries naming an
//! unknown element are reported.

use std::collections::HashMap;

use log::{debug, info};

use bpmnviz_core::{
    geometry::{Bounds, Point},
    model::{BpmnModel, Edge, Font, Label, MessageVisibleKind, Shape},
    semantic::{CallActivityKind, Flow, MarkerKind, ShapeBpmnElement, ShapeBpmnElementKind},
};

use crate::{
    converter::ParseContext,
    element::JsonElement,
    error::{Diagnostic, ErrorCode, Result},
};

/// Where a resolved shape goes in the model.
enum ShapeGroup {
    Pool,
    Lane,
    FlowNode,
}

/// Build the model from the diagram-interchange section of `definitions`.
pub(crate) fn deserialize(definitions: &JsonElement<'_>, context: &mut ParseContext) -> BpmnModel {
    let diagrams = definitions.children("BPMNDiagram", false);
    let Some(diagram) = diagrams.first() else {
        info!("Document has no diagram, the model is empty");
        return BpmnModel::default();
    };
    if diagrams.len() > 1 {
        debug!(diagrams = diagrams.len(); "Only the first diagram is read");
    }

    let fonts = deserialize_fonts(diagram);
    let Some(plane) = diagram.child("BPMNPlane") else {
        return BpmnModel::default();
    };

    let mut pools = Vec::new();
    let mut lanes = Vec::new();
    let mut flow_nodes = Vec::new();
    for di_shape in plane.children("BPMNShape", false) {
        let element_id = di_shape.attr("bpmnElement");
        match build_shape(&di_shape, &fonts, context) {
            Ok(Some((ShapeGroup::Pool, shape))) => pools.push(shape),
            Ok(Some((ShapeGroup::Lane, shape))) => lanes.push(shape),
            Ok(Some((ShapeGroup::FlowNode, shape))) => flow_nodes.push(shape),
            Ok(None) => {}
            Err(diagnostic) => context.reject(element_id.as_deref(), diagnostic),
        }
    }

    let mut edges = Vec::new();
    for di_edge in plane.children("BPMNEdge", false) {
        let element_id = di_edge.attr("bpmnElement");
        match build_edge(&di_edge, &fonts, context) {
            Ok(Some(edge)) => edges.push(edge),
            Ok(None) => {}
            Err(diagnostic) => context.reject(element_id.as_deref(), diagnostic),
        }
    }

    info!(
        pools = pools.len(),
        lanes = lanes.len(),
        flow_nodes = flow_nodes.len(),
        edges = edges.len();
        "Diagram converted"
    );
    BpmnModel::new(pools, lanes, flow_nodes, edges)
}

/// Fonts of the `BPMNLabelStyle` entries, by style id.
fn deserialize_fonts(diagram: &JsonElement<'_>) -> HashMap<String, Font> {
    let mut fonts = HashMap::new();
    for style in diagram.children("BPMNLabelStyle", false) {
        let (Some(id), Some(font)) = (style.id(), style.child("Font")) else {
            continue;
        };
        let flag = |key: &str| font.attr_bool(key).unwrap_or(false);
        let font = Font::new(font.name(), font.attr_f64("size")).with_style(
            flag("isBold"),
            flag("isItalic"),
            flag("isUnderline"),
            flag("isStrikeThrough"),
        );
        fonts.insert(id, font);
    }
    fonts
}

fn build_shape(
    di_shape: &JsonElement<'_>,
    fonts: &HashMap<String, Font>,
    context: &mut ParseContext,
) -> Result<Option<(ShapeGroup, Shape)>> {
    let id = di_shape.id().unwrap_or_default();
    let element_id = di_shape.attr("bpmnElement").unwrap_or_default();
    if context.is_rejected(&element_id) {
        debug!(id, element_id; "Skipping shape of a rejected element");
        return Ok(None);
    }

    let registry = &context.registry;
    let (group, mut element) = if let Some(element) = registry.find_flow_node_by_id(&element_id) {
        (ShapeGroup::FlowNode, element.clone())
    } else if let Some(lane) = registry.find_lane_by_id(&element_id) {
        (ShapeGroup::Lane, lane.clone())
    } else if let Some(pool) = registry.find_process_element(&element_id) {
        (ShapeGroup::Pool, pool)
    } else {
        return Err(Diagnostic::warning(format!(
            "shape `{id}` references unknown element `{element_id}`"
        ))
        .with_code(ErrorCode::W100)
        .with_label(id.as_str(), "shape of an unknown element")
        .with_secondary_label(element_id, "not declared in any process or collaboration"));
    };

    let bounds = read_bounds(di_shape).ok_or_else(|| {
        Diagnostic::warning(format!("shape `{id}` has no valid bounds"))
            .with_code(ErrorCode::W106)
            .with_label(id.as_str(), "missing or malformed `Bounds`")
    })?;

    if is_collapsed_container(&element) && di_shape.attr_bool("isExpanded") != Some(true) {
        element.add_marker(MarkerKind::Expand);
    }

    let label = build_label(di_shape, fonts, context);
    Ok(Some((
        group,
        Shape::new(id, element, bounds, label).with_horizontal(di_shape.attr_bool("isHorizontal")),
    )))
}

/// Sub-processes and process calls are drawn with the expand marker unless expanded.
fn is_collapsed_container(element: &ShapeBpmnElement) -> bool {
    match element.kind() {
        ShapeBpmnElementKind::SubProcess => true,
        ShapeBpmnElementKind::CallActivity => {
            element.call_activity_kind() == Some(CallActivityKind::CallingProcess)
        }
        _ => false,
    }
}

fn build_edge(
    di_edge: &JsonElement<'_>,
    fonts: &HashMap<String, Font>,
    context: &mut ParseContext,
) -> Result<Option<Edge>> {
    let id = di_edge.id().unwrap_or_default();
    let element_id = di_edge.attr("bpmnElement").unwrap_or_default();
    if context.is_rejected(&element_id) {
        debug!(id, element_id; "Skipping edge of a rejected flow");
        return Ok(None);
    }

    let flow = find_flow(context, &element_id).cloned().ok_or_else(|| {
        Diagnostic::warning(format!("edge `{id}` references unknown flow `{element_id}`"))
            .with_code(ErrorCode::W101)
            .with_label(id.as_str(), "edge of an unknown flow")
            .with_secondary_label(element_id.as_str(), "not declared as a flow")
    })?;

    let waypoints: Vec<Point> = di_edge
        .children("waypoint", false)
        .iter()
        .filter_map(|waypoint| Some(Point::new(waypoint.attr_f64("x")?, waypoint.attr_f64("y")?)))
        .collect();
    if waypoints.len() < 2 {
        return Err(Diagnostic::warning(format!(
            "edge `{id}` has {} usable waypoints",
            waypoints.len()
        ))
        .with_code(ErrorCode::W106)
        .with_label(id.as_str(), "an edge needs at least two waypoints"));
    }

    let message_visible_kind = di_edge
        .attr("messageVisibleKind")
        .and_then(|kind| kind.parse::<MessageVisibleKind>().ok())
        .unwrap_or_default();
    let label = build_label(di_edge, fonts, context);
    Ok(Some(Edge::new(id, flow, waypoints, label, message_visible_kind)))
}

fn find_flow<'r>(context: &'r ParseContext, element_id: &str) -> Option<&'r Flow> {
    let registry = &context.registry;
    registry
        .find_sequence_flow_by_id(element_id)
        .or_else(|| registry.find_message_flow_by_id(element_id))
        .or_else(|| registry.find_association_flow_by_id(element_id))
}

/// Read the `BPMNLabel` of a shape or edge. Empty labels are dropped.
fn build_label(
    di_element: &JsonElement<'_>,
    fonts: &HashMap<String, Font>,
    context: &mut ParseContext,
) -> Option<Label> {
    let di_label = di_element.child("BPMNLabel")?;

    let font = di_label.attr("labelStyle").and_then(|style_id| {
        let font = fonts.get(&style_id).cloned();
        if font.is_none() {
            let owner = di_element.id().unwrap_or_default();
            context.warn(
                Diagnostic::warning(format!("label of `{owner}` uses unknown style `{style_id}`"))
                    .with_code(ErrorCode::W105)
                    .with_label(owner, "label drawn with the default font"),
            );
        }
        font
    });

    let label = Label::new(font, read_bounds(&di_label));
    (!label.is_empty()).then_some(label)
}

fn read_bounds(di_element: &JsonElement<'_>) -> Option<Bounds> {
    let bounds = di_element.child("Bounds")?;
    Some(Bounds::new(
        bounds.attr_f64("x")?,
        bounds.attr_f64("y")?,
        bounds.attr_f64("width")?,
        bounds.attr_f64("height")?,
    ))
}
