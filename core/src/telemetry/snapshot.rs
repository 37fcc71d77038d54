//! telemetry/snapshot.rs
//! Immutable view of a pipeline's counters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    pub bytes_plaintext: u64,
    pub bytes_encoded: u64,
    pub layers: usize,
    /// `bytes_encoded / bytes_plaintext`; 0.0 before any plaintext. Not
    /// clamped: stacked codecs can expand small inputs.
    pub compression_ratio: f64,
}

impl PipelineSnapshot {
    pub fn from_totals(bytes_plaintext: u64, bytes_encoded: u64, layers: usize) -> Self {
        let compression_ratio = if bytes_plaintext > 0 {
            bytes_encoded as f64 / bytes_plaintext as f64
        } else {
            0.0
        };
        Self { bytes_plaintext, bytes_encoded, layers, compression_ratio }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
