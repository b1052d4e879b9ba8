//! Labels attaching messages to BPMN elements.

/// A message attached to a BPMN element, identified by its `id`.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the element the diagnostic is about.
/// - **Secondary labels** mark elements it refers to, such as the gateway
///   a boundary event is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    element_id: String,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(element_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(element_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the id of the labeled element.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
