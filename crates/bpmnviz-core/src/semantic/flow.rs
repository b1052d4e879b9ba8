//! Connecting objects: sequence flows, message flows and associations.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::semantic::kind::UnknownKindError;

/// How a sequence flow leaves its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SequenceFlowKind {
    #[default]
    Normal,
    /// The flow named by the `default` attribute of its source.
    Default,
    /// A flow with a `conditionExpression` leaving a gateway.
    ConditionalFromGateway,
    /// A flow with a `conditionExpression` leaving an activity.
    ConditionalFromActivity,
}

/// The `associationDirection` of an association.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssociationDirectionKind {
    #[default]
    None,
    One,
    Both,
}

impl FromStr for AssociationDirectionKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "One" => Ok(Self::One),
            "Both" => Ok(Self::Both),
            _ => Err(UnknownKindError::new("association direction", s)),
        }
    }
}

/// The kind of a flow, with the payload only meaningful for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FlowKind {
    SequenceFlow {
        #[serde(rename = "sequenceFlowKind")]
        sequence_flow_kind: SequenceFlowKind,
    },
    MessageFlow,
    Association {
        direction: AssociationDirectionKind,
    },
}

impl FlowKind {
    /// Returns the BPMN XML element name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SequenceFlow { .. } => "sequenceFlow",
            Self::MessageFlow => "messageFlow",
            Self::Association { .. } => "association",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flow connecting two BPMN elements by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(flatten)]
    kind: FlowKind,
    source_ref: String,
    target_ref: String,
}

impl Flow {
    /// Create a new flow from `source_ref` to `target_ref`.
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        kind: FlowKind,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            kind,
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
        }
    }

    /// Get the flow identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the flow name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the kind of this flow.
    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    /// Get the id of the element this flow leaves.
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    /// Get the id of the element this flow enters.
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Returns the sequence flow kind, or `None` for message flows and associations.
    pub fn sequence_flow_kind(&self) -> Option<SequenceFlowKind> {
        match self.kind {
            FlowKind::SequenceFlow { sequence_flow_kind } => Some(sequence_flow_kind),
            _ => None,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.id, self.source_ref, self.target_ref)
    }
}
