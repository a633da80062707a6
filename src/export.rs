//! Structured evidence export.
//!
//! Flattens a store snapshot into serializable records and wraps it with
//! the fixed advisory text plus session metadata. The report layer never
//! inspects payloads and stays agnostic to the sink: callers hand it any
//! `std::io::Write`.
//!
//! ## Key Components
//!
//! - [`DeviceExportRecord`]: One device's metadata plus its flattened
//!   advertisement history, oldest first.
//! - [`CaptureReport`]: Advisory text, session metadata and all device
//!   export records; serializes to pretty-printed JSON.
//!
//! ## Example Usage
//!
//! ```
//! use scankit::export::CaptureReport;
//! use scankit::record::Advertisement;
//! use scankit::store::DeviceHistoryStore;
//!
//! let mut store = DeviceHistoryStore::new(8, 8);
//! store.ingest(Advertisement::new("dev-a", -60, vec![1u8, 2])).unwrap();
//!
//! let report = CaptureReport::from_store(&store);
//! let json = report.to_json_string().unwrap();
//! assert!(json.contains("dev-a"));
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{AdvertisementRecord, DeviceRecord};
use crate::store::DeviceHistoryStore;

/// Fixed advisory string prepended to every capture report.
pub const ADVISORY_TEXT: &str = "Passive advertisement capture. RSSI values are \
receiver-relative and timestamps reflect the host clock at capture time; \
device histories are bounded and may omit older packets.";

/// Serializable flattening of one retained device.
///
/// `advertisement_history` is ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceExportRecord<P> {
    pub device_id: String,
    pub local_name: Option<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub company_id: Option<u16>,
    pub services: Vec<Uuid>,
    pub advertisement_history: Vec<AdvertisementRecord<P>>,
}

impl<P> DeviceExportRecord<P> {
    /// Copies one device record into its export shape.
    pub(crate) fn from_device(device_id: &str, record: &DeviceRecord<P>) -> Self
    where
        P: Clone,
    {
        Self {
            device_id: device_id.to_owned(),
            local_name: record.local_name().map(str::to_owned),
            first_seen: record.first_seen(),
            last_seen: record.last_seen(),
            company_id: record.company_id(),
            services: record.services().to_vec(),
            advertisement_history: record.history().to_vec(),
        }
    }
}

/// Complete evidence report for one capture session.
///
/// Built from a store borrow; the store is not mutated. Session metadata is
/// captured at build time so a report remains a faithful snapshot even if
/// the store keeps ingesting afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport<P> {
    pub advisory: String,
    pub generated_at: DateTime<Utc>,
    pub device_count: usize,
    pub total_observed: u64,
    pub device_capacity: usize,
    pub history_capacity: usize,
    pub devices: Vec<DeviceExportRecord<P>>,
}

impl<P: Clone> CaptureReport<P> {
    /// Builds a report from the store's current contents.
    pub fn from_store(store: &DeviceHistoryStore<P>) -> Self {
        Self {
            advisory: ADVISORY_TEXT.to_owned(),
            generated_at: Utc::now(),
            device_count: store.len(),
            total_observed: store.total_observed(),
            device_capacity: store.device_capacity(),
            history_capacity: store.history_capacity(),
            devices: store.export_snapshot(),
        }
    }
}

impl<P: Serialize> CaptureReport<P> {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the report as pretty-printed JSON to any sink.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}
