//! telemetry/mod.rs
//! Byte counters for pipeline instances and immutable snapshots.
//!
//! Notes:
//! - Counters are shared between a pipeline and its terminal layer, so the
//!   encoded side is measured where bytes cross the caller's stream.
//! - Snapshots are plain serde values, safe to log or export.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
