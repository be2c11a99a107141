//! Change event types for catalog mutations
//!
//! Every successful create, update, or delete on the catalog produces one
//! [`ChangeEvent`]. Events are immutable snapshots and are never rewritten
//! after emission.

use super::parameter::Parameter;

/// Kind of catalog mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The key did not exist before the write
    Created,
    /// The key existed and its value was replaced
    Updated,
    /// The key was removed
    Deleted,
}

impl ChangeKind {
    /// Wire name of the kind, used as the SSE event name
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Created => "CREATED",
            ChangeKind::Updated => "UPDATED",
            ChangeKind::Deleted => "DELETED",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog mutation
///
/// For [`ChangeKind::Deleted`] the parameter is the value that existed
/// immediately before removal. Cheap to clone; the broadcast channel clones
/// one per subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What happened
    pub kind: ChangeKind,
    /// Snapshot of the affected parameter
    pub parameter: Parameter,
}

impl ChangeEvent {
    /// Create a new change event
    pub fn new(kind: ChangeKind, parameter: Parameter) -> Self {
        Self { kind, parameter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ChangeKind::Created.as_str(), "CREATED");
        assert_eq!(ChangeKind::Updated.as_str(), "UPDATED");
        assert_eq!(ChangeKind::Deleted.as_str(), "DELETED");
    }

    #[test]
    fn test_event_equality() {
        let a = ChangeEvent::new(ChangeKind::Created, Parameter::new("k", "v"));
        let b = ChangeEvent::new(ChangeKind::Created, Parameter::new("k", "v"));
        assert_eq!(a, b);
    }
}
