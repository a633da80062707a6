use std::cell::Cell;

use crate::metrics::snapshot::StoreMetricsSnapshot;

/// Counter for paths that only hold `&self`.
///
/// Export is a pure read of the store, so its call count cannot live in a
/// plain field the way the mutating counters do.
///
/// # Safety
/// `Cell` is not `Sync`. Sharing is sound because every store access, export
/// included, is serialized by the single-writer discipline (or the
/// concurrency wrapper's exclusive lock); the counter is observational and
/// never affects correctness.
#[derive(Debug, Default)]
pub struct ReadPathCounter(Cell<u64>);

impl ReadPathCounter {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY: see the type-level note; all access is externally serialized.
unsafe impl Sync for ReadPathCounter {}
unsafe impl Send for ReadPathCounter {}

/// Counters recorded by a [`DeviceHistoryStore`](crate::store::DeviceHistoryStore).
///
/// Mutating paths bump plain fields through `&mut self`; `export_calls`
/// uses a [`ReadPathCounter`] because export takes `&self`.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    pub ingest_calls: u64,
    pub new_devices: u64,
    pub repeat_ingests: u64,

    pub evicted_devices: u64,
    pub overwritten_records: u64,

    pub export_calls: ReadPathCounter,
    pub clear_calls: u64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot current counters plus the supplied gauges.
    pub fn snapshot(&self, device_count: usize, device_capacity: usize) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            ingest_calls: self.ingest_calls,
            new_devices: self.new_devices,
            repeat_ingests: self.repeat_ingests,
            evicted_devices: self.evicted_devices,
            overwritten_records: self.overwritten_records,
            export_calls: self.export_calls.get(),
            clear_calls: self.clear_calls,
            device_count,
            device_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_path_counter_accumulates_through_shared_refs() {
        let counter = ReadPathCounter::default();
        let shared = &counter;
        shared.bump();
        shared.bump();
        shared.bump();
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn snapshot_copies_counters_and_gauges() {
        let mut metrics = StoreMetrics::new();
        metrics.ingest_calls = 7;
        metrics.new_devices = 3;
        metrics.export_calls.bump();
        metrics.export_calls.bump();

        let snapshot = metrics.snapshot(2, 10);
        assert_eq!(snapshot.ingest_calls, 7);
        assert_eq!(snapshot.new_devices, 3);
        assert_eq!(snapshot.export_calls, 2);
        assert_eq!(snapshot.device_count, 2);
        assert_eq!(snapshot.device_capacity, 10);
    }
}
