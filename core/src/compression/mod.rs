//! compression/mod.rs
//! Layered content-coding pipelines.
//!
//! Layout:
//! - `constants` / `config`: encoding names and codec parameters.
//! - `types`: layer traits and `PipelineError`.
//! - `codecs`: the concrete layers (identity, gzip, zlib, deflate, br, zstd,
//!   compress).
//! - `registry`: name -> factory maps, with immutable built-in defaults.
//! - `writer` / `reader`: the streaming compressor and decompressor.
//! - `buffer`: one-shot helpers on top of the streaming types.

pub mod buffer;
pub mod codecs;
pub mod config;
pub mod constants;
pub mod reader;
pub mod registry;
mod state;
pub mod types;
pub mod writer;

pub use buffer::{compress, decompress};
pub use config::{CodecConfig, ConfigError};
pub use constants::encoding_names;
pub use reader::StreamDecompressor;
pub use registry::{CompressionFactory, CompressionRegistry, DecompressionFactory, DecompressionRegistry};
pub use types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer, PipelineError};
pub use writer::StreamCompressor;
