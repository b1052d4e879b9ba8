//! Artifacts: text annotations, groups and associations.
//!
//! Artifacts may be declared on a process, a sub-process or a collaboration.

use std::str::FromStr;

use log::debug;

use bpmnviz_core::semantic::{
    AssociationDirectionKind, Flow, FlowKind, ShapeBpmnElement, ShapeBpmnElementKind,
};

use crate::{
    converter::ParseContext,
    element::JsonElement,
    error::{Diagnostic, ErrorCode, Result},
};

/// Convert and register the artifacts declared directly on `container`.
pub(crate) fn convert_artifacts(
    container: &JsonElement<'_>,
    parent_id: Option<&str>,
    context: &mut ParseContext,
) {
    for annotation in container.children("textAnnotation", false) {
        let id = match required_id(&annotation, "text annotation") {
            Ok(id) => id,
            Err(diagnostic) => {
                context.warn(diagnostic);
                continue;
            }
        };
        let name = annotation.child_text("text");
        debug!(id; "Registering text annotation");
        context.registry.register_flow_node(ShapeBpmnElement::new(
            id,
            name,
            ShapeBpmnElementKind::TextAnnotation,
            parent_id.map(str::to_string),
        ));
    }

    for group in container.children("group", false) {
        let id = group.id();
        match build_group(&group, parent_id, context) {
            Ok(element) => context.registry.register_flow_node(element),
            Err(diagnostic) => context.reject(id.as_deref(), diagnostic),
        }
    }

    for association in container.children("association", false) {
        let id = association.id();
        match build_association(&association) {
            Ok(flow) => context.registry.register_association_flow(flow),
            Err(diagnostic) => context.reject(id.as_deref(), diagnostic),
        }
    }
}

fn build_group(
    group: &JsonElement<'_>,
    parent_id: Option<&str>,
    context: &ParseContext,
) -> Result<ShapeBpmnElement> {
    let id = required_id(group, "group")?;
    let category_value_ref = group.attr("categoryValueRef");
    let name = category_value_ref
        .as_deref()
        .and_then(|value_ref| context.registry.find_category_value_by_id(value_ref));

    match name {
        Some(name) => Ok(ShapeBpmnElement::new(
            id,
            name.map(str::to_string),
            ShapeBpmnElementKind::Group,
            parent_id.map(str::to_string),
        )),
        None => {
            let reference = category_value_ref.unwrap_or_default();
            Err(
                Diagnostic::warning(format!(
                    "group `{id}` references unknown category value `{reference}`"
                ))
                .with_code(ErrorCode::W104)
                .with_label(id, "group without category value")
                .with_help("declare the category value under a root `category` element"),
            )
        }
    }
}

fn build_association(association: &JsonElement<'_>) -> Result<Flow> {
    let id = required_id(association, "association")?;
    let (source_ref, target_ref) = flow_ends(association, &id)?;
    let direction = association
        .attr("associationDirection")
        .and_then(|direction| AssociationDirectionKind::from_str(&direction).ok())
        .unwrap_or_default();

    Ok(Flow::new(
        id,
        association.name(),
        FlowKind::Association { direction },
        source_ref,
        target_ref,
    ))
}

/// Read the `id` of an element that cannot be converted without one.
pub(crate) fn required_id(element: &JsonElement<'_>, kind: &str) -> Result<String> {
    element.id().ok_or_else(|| {
        Diagnostic::warning(format!("{kind} without `id` is ignored")).with_code(ErrorCode::W100)
    })
}

/// Read `sourceRef` and `targetRef` of a flow.
pub(crate) fn flow_ends(flow: &JsonElement<'_>, id: &str) -> Result<(String, String)> {
    match (flow.attr("sourceRef"), flow.attr("targetRef")) {
        (Some(source_ref), Some(target_ref)) => Ok((source_ref, target_ref)),
        _ => Err(Diagnostic::warning(format!(
            "flow `{id}` is missing its `sourceRef` or `targetRef`"
        ))
        .with_code(ErrorCode::W101)
        .with_label(id, "incomplete flow")),
    }
}
