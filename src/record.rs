//! Advertisement and device record types.
//!
//! An [`Advertisement`] is the ingest argument: one observed packet with its
//! device identifier and whatever metadata the transport decoded alongside
//! it. The store snapshots it into an immutable [`AdvertisementRecord`] and
//! accumulates per-device state in a [`DeviceRecord`].
//!
//! All types are generic over the payload `P`, which the capture core treats
//! as opaque. A raw-bytes scanner uses `Vec<u8>`; a scanner with its own
//! decoder can store any structured record instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ds::RingBuffer;

/// One observed advertisement packet, as handed to the store by the
/// advertisement source.
///
/// Only `device_id`, `rssi` and `payload` are mandatory; metadata fields
/// default to absent and are attached with the `with_*` builders.
///
/// # Example
///
/// ```
/// use scankit::record::Advertisement;
/// use uuid::Uuid;
///
/// let adv = Advertisement::new("aa:bb:cc:dd:ee:ff", -67, vec![0x02, 0x01, 0x06])
///     .with_local_name("Thermostat")
///     .with_company_id(0x004C)
///     .with_services(vec![Uuid::from_u128(0x1809)]);
///
/// assert_eq!(adv.rssi, -67);
/// assert_eq!(adv.local_name.as_deref(), Some("Thermostat"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement<P> {
    /// Stable device identifier from the transport layer.
    pub device_id: String,
    /// Advertised local name, if the packet carried one.
    pub local_name: Option<String>,
    /// Received signal strength in dBm.
    pub rssi: i16,
    /// Manufacturer company identifier, if present.
    pub company_id: Option<u16>,
    /// Advertised service identifiers, if present.
    pub services: Vec<Uuid>,
    /// Opaque payload snapshot.
    pub payload: P,
}

impl<P> Advertisement<P> {
    /// Creates an advertisement with the mandatory fields and no metadata.
    pub fn new(device_id: impl Into<String>, rssi: i16, payload: P) -> Self {
        Self {
            device_id: device_id.into(),
            local_name: None,
            rssi,
            company_id: None,
            services: Vec::new(),
            payload,
        }
    }

    /// Attaches an advertised local name.
    pub fn with_local_name(mut self, name: impl Into<String>) -> Self {
        self.local_name = Some(name.into());
        self
    }

    /// Attaches a manufacturer company identifier.
    pub fn with_company_id(mut self, company_id: u16) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Attaches advertised service identifiers.
    pub fn with_services(mut self, services: Vec<Uuid>) -> Self {
        self.services = services;
        self
    }
}

/// Stored snapshot of one advertisement: payload, RSSI and capture time.
///
/// Immutable once stored; destroyed only by ring overwrite or when its
/// owning device record is destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementRecord<P> {
    pub payload: P,
    pub rssi: i16,
    pub timestamp: DateTime<Utc>,
}

/// Accumulated state for one device identifier.
///
/// Created on first ingest of an unseen identifier, destroyed only by FIFO
/// eviction or store teardown. Mutation happens exclusively through
/// [`DeviceHistoryStore::ingest`](crate::store::DeviceHistoryStore::ingest);
/// callers get read access only.
#[derive(Debug, Clone)]
pub struct DeviceRecord<P> {
    pub(crate) local_name: Option<String>,
    pub(crate) first_seen: DateTime<Utc>,
    pub(crate) last_seen: DateTime<Utc>,
    pub(crate) company_id: Option<u16>,
    pub(crate) services: Vec<Uuid>,
    pub(crate) history: RingBuffer<AdvertisementRecord<P>>,
}

impl<P> DeviceRecord<P> {
    /// Creates a fresh record with an empty history ring of `history_capacity`.
    ///
    /// The ring capacity is fixed here and never changes for the record's
    /// lifetime. Callers validate `history_capacity` before reaching this.
    pub(crate) fn new(history_capacity: usize, now: DateTime<Utc>) -> Self {
        Self {
            local_name: None,
            first_seen: now,
            last_seen: now,
            company_id: None,
            services: Vec::new(),
            history: RingBuffer::new(history_capacity),
        }
    }

    /// Latest-known advertised local name.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    /// Timestamp of the first ingest for this record; set once, never mutated.
    pub fn first_seen(&self) -> DateTime<Utc> {
        self.first_seen
    }

    /// Timestamp of the most recent ingest for this record.
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Latest-known manufacturer company identifier.
    pub fn company_id(&self) -> Option<u16> {
        self.company_id
    }

    /// Latest-known advertised service identifiers.
    pub fn services(&self) -> &[Uuid] {
        &self.services
    }

    /// The record's advertisement history, oldest surviving packet first.
    pub fn history(&self) -> &RingBuffer<AdvertisementRecord<P>> {
        &self.history
    }
}
