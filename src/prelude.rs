pub use crate::ds::RingBuffer;
pub use crate::error::{ConfigError, DeviceIdError};
pub use crate::export::{ADVISORY_TEXT, CaptureReport, DeviceExportRecord};
pub use crate::record::{Advertisement, AdvertisementRecord, DeviceRecord};
pub use crate::store::{
    DEFAULT_DEVICE_CAPACITY, DEFAULT_HISTORY_CAPACITY, DeviceHistoryStore, IngestResult,
};

#[cfg(feature = "concurrency")]
pub use crate::store::ConcurrentHistoryStore;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::StoreMetricsSnapshot;
