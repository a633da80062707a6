//! Thread-safe wrapper for the history store.
//!
//! The core store assumes a single logical writer and provides no internal
//! mutual exclusion. Callers that drive ingestion from more than one
//! execution context use this wrapper instead: a `parking_lot::RwLock`
//! serializes ingest against export, leaving the lock-free core unchanged.

use parking_lot::RwLock;

use crate::error::{ConfigError, DeviceIdError};
use crate::export::DeviceExportRecord;
#[cfg(feature = "metrics")]
use crate::metrics::StoreMetricsSnapshot;
use crate::record::Advertisement;
use crate::store::history::{DeviceHistoryStore, IngestResult};

#[derive(Debug)]
/// Thread-safe wrapper around [`DeviceHistoryStore`] using a `parking_lot::RwLock`.
pub struct ConcurrentHistoryStore<P> {
    inner: RwLock<DeviceHistoryStore<P>>,
}

impl<P> ConcurrentHistoryStore<P> {
    /// Creates a store with the given ceilings.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero. See [`try_new`](Self::try_new).
    pub fn new(device_capacity: usize, history_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(DeviceHistoryStore::new(device_capacity, history_capacity)),
        }
    }

    /// Creates a store with the given ceilings, validating both.
    pub fn try_new(device_capacity: usize, history_capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(DeviceHistoryStore::try_new(
                device_capacity,
                history_capacity,
            )?),
        })
    }

    /// Creates a store with the default ceilings.
    pub fn with_defaults() -> Self {
        Self {
            inner: RwLock::new(DeviceHistoryStore::with_defaults()),
        }
    }

    /// Records one observed advertisement under the write lock.
    pub fn ingest(&self, adv: Advertisement<P>) -> Result<IngestResult, DeviceIdError> {
        let mut store = self.inner.write();
        store.ingest(adv)
    }

    /// Tries to record an advertisement without blocking.
    ///
    /// Returns the advertisement back if the lock is contended, so the
    /// caller can retry or drop the packet.
    pub fn try_ingest(
        &self,
        adv: Advertisement<P>,
    ) -> Result<Result<IngestResult, DeviceIdError>, Advertisement<P>> {
        match self.inner.try_write() {
            Some(mut store) => Ok(store.ingest(adv)),
            None => Err(adv),
        }
    }

    /// Flattens every retained device into an export record.
    pub fn export_snapshot(&self) -> Vec<DeviceExportRecord<P>>
    where
        P: Clone,
    {
        // Exclusive lock: export bumps a metrics cell, which must not be
        // shared between simultaneous readers.
        let store = self.inner.write();
        store.export_snapshot()
    }

    /// Empties the store and resets the lifetime counter.
    pub fn clear(&self) {
        let mut store = self.inner.write();
        store.clear()
    }

    /// Returns the number of devices currently retained.
    pub fn len(&self) -> usize {
        let store = self.inner.read();
        store.len()
    }

    /// Returns `true` if no devices are retained.
    pub fn is_empty(&self) -> bool {
        let store = self.inner.read();
        store.is_empty()
    }

    /// Returns `true` if `device_id` is currently retained.
    pub fn contains(&self, device_id: &str) -> bool {
        let store = self.inner.read();
        store.contains(device_id)
    }

    /// Returns the lifetime count of devices ever observed.
    pub fn total_observed(&self) -> u64 {
        let store = self.inner.read();
        store.total_observed()
    }

    /// Returns the device ceiling (N).
    pub fn device_capacity(&self) -> usize {
        let store = self.inner.read();
        store.device_capacity()
    }

    /// Returns the per-device history ceiling (M).
    pub fn history_capacity(&self) -> usize {
        let store = self.inner.read();
        store.history_capacity()
    }

    /// Snapshot of store metrics plus gauges captured at snapshot time.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        let store = self.inner.read();
        store.metrics_snapshot()
    }
}
