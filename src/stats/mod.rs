//! Statistics and metrics for the parameter catalog

pub mod metrics;

pub use metrics::{CatalogStats, EventCounters, EventCounts};
