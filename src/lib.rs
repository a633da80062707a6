//! scankit: bounded per-device advertisement history capture primitives.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod export;
pub mod record;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
