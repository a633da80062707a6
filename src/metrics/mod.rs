//! Ingest, eviction and export counters for the history store.
//!
//! Compiled only under the `metrics` feature. Counters are observational:
//! they never change store behavior and cost nothing when the feature is
//! off.

pub mod metrics_impl;
pub mod snapshot;

pub use metrics_impl::{ReadPathCounter, StoreMetrics};
pub use snapshot::StoreMetricsSnapshot;
