//! BpmnViz Core Types and Definitions
//!
//! This crate provides the foundational types of the BpmnViz model. It
//! includes:
//!
//! - **Geometry**: Bounds and waypoints from diagram interchange ([`geometry`] module)
//! - **Semantic**: BPMN elements, flows and their kinds ([`semantic`] module)
//! - **Model**: Renderable shapes and edges and the final [`model::BpmnModel`]

pub mod geometry;
pub mod model;
pub mod semantic;
