//! Statistics for the parameter catalog

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::catalog::ChangeKind;

/// Running counters of emitted change events
#[derive(Debug, Default)]
pub struct EventCounters {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
}

impl EventCounters {
    /// Create new counters, all zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one emitted event of the given kind
    pub fn record(&self, kind: ChangeKind) {
        let counter = match kind {
            ChangeKind::Created => &self.created,
            ChangeKind::Updated => &self.updated,
            ChangeKind::Deleted => &self.deleted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> EventCounts {
        EventCounts {
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of event counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    /// CREATED events emitted
    pub created: u64,
    /// UPDATED events emitted
    pub updated: u64,
    /// DELETED events emitted
    pub deleted: u64,
}

impl EventCounts {
    /// Total events emitted
    pub fn total(&self) -> u64 {
        self.created + self.updated + self.deleted
    }
}

/// Catalog-level statistics
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    /// Number of stored parameters
    pub parameters: usize,
    /// Number of attached subscribers
    pub subscribers: usize,
    /// Emitted event counts by kind
    pub events: EventCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let counters = EventCounters::new();
        counters.record(ChangeKind::Created);
        counters.record(ChangeKind::Updated);
        counters.record(ChangeKind::Updated);
        counters.record(ChangeKind::Deleted);

        let counts = counters.snapshot();
        assert_eq!(counts.created, 1);
        assert_eq!(counts.updated, 2);
        assert_eq!(counts.deleted, 1);
        assert_eq!(counts.total(), 4);
    }
}
