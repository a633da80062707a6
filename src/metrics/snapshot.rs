/// Plain-value snapshot of store metrics, safe to hand across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreMetricsSnapshot {
    pub ingest_calls: u64,
    pub new_devices: u64,
    pub repeat_ingests: u64,

    pub evicted_devices: u64,
    pub overwritten_records: u64,

    pub export_calls: u64,
    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub device_count: usize,
    pub device_capacity: usize,
}
