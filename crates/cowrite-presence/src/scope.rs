//! Document Scoping

use std::fmt;

/// Identifies the document a presence channel is scoped to.
///
/// The derived channel name is deterministic, so a given document maps to
/// the same channel across reconnects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocScope {
    namespace: String,
    id: String,
}

impl DocScope {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Scope for a contact's shared note
    pub fn note(contact_id: impl Into<String>) -> Self {
        Self::new("note", contact_id)
    }

    /// Presence channel name for this scope
    pub fn channel_name(&self) -> String {
        format!("presence-{}-{}", self.namespace, self.id)
    }
}

impl fmt::Display for DocScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.namespace, self.id)
    }
}
