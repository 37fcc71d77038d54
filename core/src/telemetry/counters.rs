//! telemetry/counters.rs
//! Mutable counters updated while a pipeline runs.
//!
//! Summary: plaintext bytes are counted at the pipeline's `Read`/`Write`
//! surface, encoded bytes at the caller's sink/source. Converted into an
//! immutable `PipelineSnapshot` on demand.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::telemetry::snapshot::PipelineSnapshot;

#[derive(Debug, Default)]
pub struct PipelineCounters {
    bytes_plaintext: AtomicU64,
    bytes_encoded: AtomicU64,
    layers: AtomicUsize,
}

impl PipelineCounters {
    /// Plaintext accepted by a compressor or produced by a decompressor.
    pub fn add_plaintext(&self, n: usize) {
        self.bytes_plaintext.fetch_add(n as u64, Ordering::Relaxed);
    }

    /// Encoded bytes written to the destination or read from the source.
    pub fn add_encoded(&self, n: usize) {
        self.bytes_encoded.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn set_layers(&self, layers: usize) {
        self.layers.store(layers, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot::from_totals(
            self.bytes_plaintext.load(Ordering::Relaxed),
            self.bytes_encoded.load(Ordering::Relaxed),
            self.layers.load(Ordering::Relaxed),
        )
    }
}
