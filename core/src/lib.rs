//! codec-pipeline
//!
//! Layered `Content-Encoding` compression and decompression chains.
//! Pure Rust surface over flate2, brotli, zstd and weezl.

#![forbid(unsafe_code)]

pub mod compression;
pub mod telemetry;
pub mod utils;

pub use compression::{
    compress, decompress, CodecConfig, CompressionRegistry, DecompressionRegistry, PipelineError,
    StreamCompressor, StreamDecompressor,
};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compress, decompress, encoding_names, BoxedDecoder, BoxedEncoder, CodecConfig,
        CompressionRegistry, DecodeLayer, DecompressionRegistry, EncodeLayer, PipelineError,
        StreamCompressor, StreamDecompressor,
    };
    pub use crate::utils::parse_encoding_list;
}
