//! Error types for the scankit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when capture configuration parameters are
//!   invalid (zero device or history capacity).
//! - [`DeviceIdError`]: Returned when an advertisement carries an empty
//!   device identifier.
//!
//! Both are pre-condition failures detected before any state mutation.
//! Eviction and ring overwrite are steady-state behavior under sustained
//! load and are never surfaced as errors.
//!
//! ## Example Usage
//!
//! ```
//! use scankit::error::ConfigError;
//! use scankit::store::DeviceHistoryStore;
//!
//! // Fallible constructor for user-configurable capacities
//! let store: Result<DeviceHistoryStore<Vec<u8>>, ConfigError> =
//!     DeviceHistoryStore::try_new(100, 50);
//! assert!(store.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = DeviceHistoryStore::<Vec<u8>>::try_new(0, 50);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when capture configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`DeviceHistoryStore::try_new`](crate::store::DeviceHistoryStore::try_new)
/// and [`RingBuffer::try_new`](crate::ds::RingBuffer::try_new). Carries a
/// human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use scankit::ds::RingBuffer;
///
/// let err = RingBuffer::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// DeviceIdError
// ---------------------------------------------------------------------------

/// Error returned when an advertisement carries a malformed device identifier.
///
/// Produced by [`DeviceHistoryStore::ingest`](crate::store::DeviceHistoryStore::ingest)
/// before any mutation: a rejected advertisement leaves the store exactly as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdError(String);

impl DeviceIdError {
    /// Creates a new `DeviceIdError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DeviceIdError {}
