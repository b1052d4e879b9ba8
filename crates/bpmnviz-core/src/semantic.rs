//! Semantic BPMN model types.
//!
//! These types describe what a BPMN document declares, independent of where
//! it is drawn. They are produced by the semantic conversion and wrapped with
//! diagram-interchange geometry by the [`model`](crate::model) types.
//!
//! # Pipeline Position
//!
//! ```text
//! BPMN XML
//!     ↓ xml front end
//! JSON tree
//!     ↓ pre-pass + collaboration + process converters
//! Semantic elements (these types)
//!     ↓ diagram-interchange merge
//! BpmnModel (shapes and edges)
//! ```
//!
//! # Organization
//!
//! - [`kind`] - Closed vocabularies: [`ShapeBpmnElementKind`], [`EventDefinitionKind`], [`MarkerKind`], ...
//! - [`element`] - Shape elements: [`ShapeBpmnElement`], [`ShapeDetails`]
//! - [`flow`] - Connecting objects: [`Flow`], [`FlowKind`], [`SequenceFlowKind`]

pub mod element;
pub mod flow;
pub mod kind;

pub use element::*;
pub use flow::*;
pub use kind::*;
