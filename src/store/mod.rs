pub mod history;

#[cfg(feature = "concurrency")]
pub mod concurrent;

pub use history::{
    DEFAULT_DEVICE_CAPACITY, DEFAULT_HISTORY_CAPACITY, DeviceHistoryStore, IngestResult,
};

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentHistoryStore;
