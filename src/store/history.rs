//! Bounded per-device advertisement history store.
//!
//! Keeps at most N distinct devices and, per device, the last M
//! advertisement records. Devices are evicted in pure FIFO order by first
//! observation; per-device records are overwritten oldest-first by the
//! ring buffer. Both bounds are steady-state behavior, never errors.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     DeviceHistoryStore<P>                            │
//!   │                                                                      │
//!   │   order: VecDeque<String>       front = earliest inserted            │
//!   │   ┌────────┬────────┬────────┐                                       │
//!   │   │ dev A  │ dev B  │ dev C  │   ← first-seen order                  │
//!   │   └────────┴────────┴────────┘                                       │
//!   │                                                                      │
//!   │   devices: FxHashMap<String, DeviceRecord<P>>                        │
//!   │   ┌────────┬──────────────────────────────────────────┐              │
//!   │   │ dev A  │ { first/last seen, metadata, ring of M } │              │
//!   │   │ dev B  │ { ...                                  } │              │
//!   │   │ dev C  │ { ...                                  } │              │
//!   │   └────────┴──────────────────────────────────────────┘              │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ingest Flow
//!
//! ```text
//!   ingest(advertisement)
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ Empty device id?  → DeviceIdError, store untouched                   │
//!   │ Unseen id at N?   → pop order front, drop that record (FIFO)         │
//!   │ Unseen id?        → new record, push id to order back, count it      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ last_seen = now                                                      │
//!   │ ring.push(record)   (may silently overwrite that device's oldest)    │
//!   │ merge metadata      (last-write-wins)                                │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Policy
//!
//! FIFO by insertion, not LRU by last-seen: re-observing a device never
//! moves it within the order and never triggers eviction. Once evicted, an
//! identifier has no distinguished memory; a later advertisement with the
//! same id creates a brand-new record.
//!
//! ## Thread Safety
//!
//! Single logical writer; no internal locking. Export must not interleave
//! with an in-progress ingest on the same store. Callers that drive
//! ingestion from more than one execution context wrap the store in
//! [`ConcurrentHistoryStore`](crate::store::concurrent::ConcurrentHistoryStore).

use std::collections::VecDeque;
use std::collections::hash_map::Entry;

use chrono::Utc;
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, DeviceIdError};
use crate::export::DeviceExportRecord;
#[cfg(feature = "metrics")]
use crate::metrics::{StoreMetrics, StoreMetricsSnapshot};
use crate::record::{Advertisement, AdvertisementRecord, DeviceRecord};

/// Default ceiling on distinct devices retained by a store.
pub const DEFAULT_DEVICE_CAPACITY: usize = 1000;

/// Default ceiling on advertisement records retained per device.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Outcome of one [`DeviceHistoryStore::ingest`] call.
///
/// `is_new_device` is true exactly once per identifier residency: on its
/// first ingest since store creation, `clear`, or a prior eviction of that
/// identifier. Downstream presentations use it to decide whether the device
/// list needs a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestResult {
    pub is_new_device: bool,
}

/// Insertion-ordered device map with a FIFO device ceiling and per-device
/// history rings.
///
/// # Type Parameters
///
/// - `P`: Opaque advertisement payload type
///
/// # Example
///
/// ```
/// use scankit::record::Advertisement;
/// use scankit::store::DeviceHistoryStore;
///
/// let mut store = DeviceHistoryStore::new(2, 3);
///
/// let first = store.ingest(Advertisement::new("dev-a", -60, vec![1u8])).unwrap();
/// assert!(first.is_new_device);
///
/// let again = store.ingest(Advertisement::new("dev-a", -61, vec![2u8])).unwrap();
/// assert!(!again.is_new_device);
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.total_observed(), 1);
/// ```
#[derive(Debug)]
pub struct DeviceHistoryStore<P> {
    /// Lookup table keyed by device identifier.
    devices: FxHashMap<String, DeviceRecord<P>>,
    /// Device identifiers in first-seen order; front is the eviction victim.
    order: VecDeque<String>,
    /// Ceiling on distinct devices (N).
    device_capacity: usize,
    /// Ceiling on records per device (M); fixed for every ring created here.
    history_capacity: usize,
    /// Lifetime count of devices ever observed, across evictions.
    total_observed: u64,
    #[cfg(feature = "metrics")]
    metrics: StoreMetrics,
}

impl<P> DeviceHistoryStore<P> {
    /// Creates a store with the given device and per-device ceilings.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::store::DeviceHistoryStore;
    ///
    /// let store: DeviceHistoryStore<Vec<u8>> = DeviceHistoryStore::new(100, 50);
    /// assert_eq!(store.device_capacity(), 100);
    /// assert_eq!(store.history_capacity(), 50);
    /// ```
    pub fn new(device_capacity: usize, history_capacity: usize) -> Self {
        match Self::try_new(device_capacity, history_capacity) {
            Ok(store) => store,
            Err(err) => panic!("invalid history store configuration: {err}"),
        }
    }

    /// Creates a store with the given ceilings, validating both.
    ///
    /// Returns [`ConfigError`] if either capacity is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::store::DeviceHistoryStore;
    ///
    /// assert!(DeviceHistoryStore::<()>::try_new(10, 5).is_ok());
    /// assert!(DeviceHistoryStore::<()>::try_new(0, 5).is_err());
    /// assert!(DeviceHistoryStore::<()>::try_new(10, 0).is_err());
    /// ```
    pub fn try_new(device_capacity: usize, history_capacity: usize) -> Result<Self, ConfigError> {
        if device_capacity == 0 {
            return Err(ConfigError::new(
                "device capacity must be greater than zero",
            ));
        }
        if history_capacity == 0 {
            return Err(ConfigError::new(
                "per-device history capacity must be greater than zero",
            ));
        }
        Ok(Self {
            devices: FxHashMap::with_capacity_and_hasher(device_capacity, Default::default()),
            order: VecDeque::with_capacity(device_capacity),
            device_capacity,
            history_capacity,
            total_observed: 0,
            #[cfg(feature = "metrics")]
            metrics: StoreMetrics::default(),
        })
    }

    /// Creates a store with the default ceilings
    /// ([`DEFAULT_DEVICE_CAPACITY`] devices, [`DEFAULT_HISTORY_CAPACITY`]
    /// records each).
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_DEVICE_CAPACITY, DEFAULT_HISTORY_CAPACITY)
    }

    /// Records one observed advertisement.
    ///
    /// Locates or creates the device record, evicting the earliest-inserted
    /// device first when a new identifier arrives at the ceiling. The
    /// record's ring may silently overwrite that device's oldest stored
    /// advertisement; freshly observed metadata merges last-write-wins.
    ///
    /// Returns [`DeviceIdError`] for an empty identifier, before any
    /// mutation. Never rejects a well-formed advertisement.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::record::Advertisement;
    /// use scankit::store::DeviceHistoryStore;
    ///
    /// let mut store = DeviceHistoryStore::new(2, 2);
    ///
    /// let result = store.ingest(Advertisement::new("dev-a", -55, ())).unwrap();
    /// assert!(result.is_new_device);
    ///
    /// let err = store.ingest(Advertisement::new("", -55, ())).unwrap_err();
    /// assert!(err.message().contains("empty"));
    /// assert_eq!(store.len(), 1); // rejected ingest left the store untouched
    /// ```
    pub fn ingest(&mut self, adv: Advertisement<P>) -> Result<IngestResult, DeviceIdError> {
        if adv.device_id.is_empty() {
            return Err(DeviceIdError::new("device identifier must not be empty"));
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.ingest_calls += 1;
        }

        let Advertisement {
            device_id,
            local_name,
            rssi,
            company_id,
            services,
            payload,
        } = adv;
        let now = Utc::now();

        // Bound is enforced before inserting a new key, never after.
        let is_new_device = !self.devices.contains_key(&device_id);
        if is_new_device && self.devices.len() == self.device_capacity {
            self.evict_oldest();
        }

        let record = match self.devices.entry(device_id) {
            Entry::Occupied(entry) => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.repeat_ingests += 1;
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.order.push_back(entry.key().clone());
                self.total_observed += 1;
                #[cfg(feature = "metrics")]
                {
                    self.metrics.new_devices += 1;
                }
                entry.insert(DeviceRecord::new(self.history_capacity, now))
            }
        };

        record.last_seen = now;

        #[cfg(feature = "metrics")]
        if record.history.is_full() {
            self.metrics.overwritten_records += 1;
        }
        record.history.push(AdvertisementRecord {
            payload,
            rssi,
            timestamp: now,
        });

        // Last-write-wins metadata merge; absent fields never erase known ones.
        if local_name.is_some() {
            record.local_name = local_name;
        }
        if company_id.is_some() {
            record.company_id = company_id;
        }
        if !services.is_empty() {
            record.services = services;
        }

        #[cfg(any(test, debug_assertions))]
        self.debug_validate_invariants();

        Ok(IngestResult { is_new_device })
    }

    /// Drops the earliest-inserted device record.
    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.devices.remove(&oldest);
            #[cfg(feature = "metrics")]
            {
                self.metrics.evicted_devices += 1;
            }
        }
    }

    /// Flattens every retained device into an export record, devices in
    /// first-seen order, each history oldest-first.
    ///
    /// Pure read: mutates neither counts nor order. O(N·M). Consumers only
    /// ever see this materialized copy, never references into ring internals.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::record::Advertisement;
    /// use scankit::store::DeviceHistoryStore;
    ///
    /// let mut store = DeviceHistoryStore::new(4, 4);
    /// store.ingest(Advertisement::new("dev-a", -40, vec![1u8])).unwrap();
    /// store.ingest(Advertisement::new("dev-b", -50, vec![2u8])).unwrap();
    ///
    /// let snapshot = store.export_snapshot();
    /// assert_eq!(snapshot.len(), 2);
    /// assert_eq!(snapshot[0].device_id, "dev-a");
    /// assert_eq!(snapshot[1].device_id, "dev-b");
    /// ```
    pub fn export_snapshot(&self) -> Vec<DeviceExportRecord<P>>
    where
        P: Clone,
    {
        #[cfg(feature = "metrics")]
        self.metrics.export_calls.bump();

        self.iter()
            .map(|(device_id, record)| DeviceExportRecord::from_device(device_id, record))
            .collect()
    }

    /// Empties the store and resets the lifetime counter.
    ///
    /// Used on restart of a capture session; afterwards every identifier is
    /// unseen again.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.order.clear();
        self.total_observed = 0;
        #[cfg(feature = "metrics")]
        {
            self.metrics.clear_calls += 1;
        }
    }

    /// Returns the number of devices currently retained.
    #[inline]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no devices are retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns `true` if `device_id` is currently retained.
    pub fn contains(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    /// Returns a shared reference to `device_id`'s record, if retained.
    ///
    /// A peek: it does not count as an observation and has no effect on
    /// eviction order.
    pub fn get(&self, device_id: &str) -> Option<&DeviceRecord<P>> {
        self.devices.get(device_id)
    }

    /// Iterates over retained devices in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceRecord<P>)> {
        self.order
            .iter()
            .filter_map(|id| self.devices.get(id).map(|record| (id.as_str(), record)))
    }

    /// Returns the next eviction victim without modifying state.
    pub fn peek_oldest(&self) -> Option<(&str, &DeviceRecord<P>)> {
        let id = self.order.front()?;
        self.devices.get(id).map(|record| (id.as_str(), record))
    }

    /// Returns the device ceiling (N).
    #[inline]
    pub fn device_capacity(&self) -> usize {
        self.device_capacity
    }

    /// Returns the per-device history ceiling (M).
    #[inline]
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Returns the lifetime count of devices ever observed, including
    /// evicted ones. Reset only by [`clear`](Self::clear).
    #[inline]
    pub fn total_observed(&self) -> u64 {
        self.total_observed
    }

    /// Snapshot of store metrics plus gauges captured at snapshot time.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics
            .snapshot(self.devices.len(), self.device_capacity)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.order.len(), self.devices.len());
        assert!(self.devices.len() <= self.device_capacity);
        assert!(self.total_observed >= self.devices.len() as u64);

        for id in &self.order {
            let record = self.devices.get(id).expect("ordered key missing from map");
            assert_eq!(record.history.capacity(), self.history_capacity);
        }
    }
}
