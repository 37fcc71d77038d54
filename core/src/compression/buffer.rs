//! compression/buffer.rs
//! One-shot helpers for short payloads.
//!
//! Both helpers drive the streaming types end to end, so chain construction
//! and close ordering are exactly those of `StreamCompressor` and
//! `StreamDecompressor`. `registry: None` selects the built-in registry.

use std::io::{Read, Write};

use crate::compression::reader::StreamDecompressor;
use crate::compression::registry::{CompressionRegistry, DecompressionRegistry};
use crate::compression::types::PipelineError;
use crate::compression::writer::StreamCompressor;

/// Encode `data` with every coding in `order`; the first name ends up
/// outermost.
pub fn compress<S: AsRef<str>>(
    data: &[u8],
    registry: Option<&CompressionRegistry>,
    order: &[S],
) -> Result<Vec<u8>, PipelineError> {
    let mut out = Vec::new();
    {
        let mut compressor = StreamCompressor::open(&mut out, registry, order.iter().map(|s| s.as_ref()))?;
        compressor.write_all(data)?;
        compressor.close()?;
    }
    Ok(out)
}

/// Decode `data` encoded with `order` (the same order given to `compress`).
pub fn decompress<S: AsRef<str>>(
    data: &[u8],
    registry: Option<&DecompressionRegistry>,
    order: &[S],
) -> Result<Vec<u8>, PipelineError> {
    let mut decompressor = StreamDecompressor::open(data, registry, order.iter().map(|s| s.as_ref()))?;
    let mut out = Vec::new();
    decompressor.read_to_end(&mut out)?;
    decompressor.close()?;
    Ok(out)
}
