//! Error codes for the BpmnViz diagnostic system.
//!
//! Codes are organized by severity:
//! - `E0xx` - Fatal errors: there is no document to convert
//! - `W1xx` - Warnings: one element is left out of the model

use std::fmt;

/// Codes categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Fatal Errors (E0xx)
    // =========================================================================
    /// Input is not a JSON object.
    E001,

    /// Missing `definitions` root.
    ///
    /// The document has no BPMN `definitions` element.
    E002,

    /// Malformed XML.
    ///
    /// The XML front end could not read the source text.
    E003,

    // =========================================================================
    // Warnings (W1xx)
    // =========================================================================
    /// Unknown shape element.
    ///
    /// A semantic element could not be classified (ambiguous or missing
    /// event definition, unresolved call activity target), or a `BPMNShape`
    /// references no known element.
    W100,

    /// Unknown edge element.
    ///
    /// A `BPMNEdge` references no known flow, or a flow has an unresolved
    /// source or target.
    W101,

    /// Boundary event not attached to an activity.
    ///
    /// The `attachedToRef` of a boundary event is missing, unresolved, or
    /// names something other than a task, sub-process or call activity.
    W102,

    /// Unknown lane flow node reference.
    ///
    /// A `flowNodeRef` of a lane names no known flow node.
    W103,

    /// Unknown group category value.
    ///
    /// The `categoryValueRef` of a group names no known category value.
    W104,

    /// Label style without font.
    ///
    /// A `BPMNLabel` references a `labelStyle` that declares no font.
    W105,

    /// Invalid diagram geometry.
    ///
    /// A `BPMNShape` has no `Bounds`, or a `BPMNEdge` has fewer than two
    /// waypoints.
    W106,

    /// Unknown parent.
    ///
    /// An element refers to a container that was never registered.
    W107,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
            ErrorCode::W102 => "W102",
            ErrorCode::W103 => "W103",
            ErrorCode::W104 => "W104",
            ErrorCode::W105 => "W105",
            ErrorCode::W106 => "W106",
            ErrorCode::W107 => "W107",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "input is not an object",
            ErrorCode::E002 => "missing definitions",
            ErrorCode::E003 => "malformed XML",
            ErrorCode::W100 => "unknown shape element",
            ErrorCode::W101 => "unknown edge element",
            ErrorCode::W102 => "boundary event not attached to an activity",
            ErrorCode::W103 => "unknown lane flow node reference",
            ErrorCode::W104 => "unknown group category value",
            ErrorCode::W105 => "label style without font",
            ErrorCode::W106 => "invalid diagram geometry",
            ErrorCode::W107 => "unknown parent",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
