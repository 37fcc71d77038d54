//! compression/registry.rs
//! Encoding-name registries and factory functions.
//!
//! Design notes:
//! - Compression and decompression registries are independent maps; the
//!   built-ins keep them symmetric.
//! - Built-in defaults are immutable process-wide values. Custom registries are
//!   plain values the caller passes to the pipelines.
//! - Names are case-sensitive HTTP content-coding tokens.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};

use crate::compression::codecs;
use crate::compression::config::CodecConfig;
use crate::compression::constants::encoding_names::*;
use crate::compression::types::{BoxedDecoder, BoxedEncoder, PipelineError};

/// Wraps the current outermost writer with a new codec layer.
pub type CompressionFactory =
    Arc<dyn for<'a> Fn(BoxedEncoder<'a>) -> io::Result<BoxedEncoder<'a>> + Send + Sync>;

/// Wraps the current reader with a new decode layer.
pub type DecompressionFactory =
    Arc<dyn for<'a> Fn(BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct CompressionRegistry {
    factories: HashMap<String, CompressionFactory>,
}

#[derive(Clone, Default)]
pub struct DecompressionRegistry {
    factories: HashMap<String, DecompressionFactory>,
}

impl CompressionRegistry {
    /// Registry with no entries, for fully custom setups.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared built-in registry with default codec parameters.
    pub fn builtin() -> &'static CompressionRegistry {
        static BUILTIN: OnceLock<CompressionRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| CompressionRegistry::from_config(&CodecConfig::default()))
    }

    /// Built-in codecs with configured parameters. Parameters are checked when
    /// a layer is built, so an out-of-range value fails that layer only.
    pub fn from_config(config: &CodecConfig) -> Self {
        let mut registry = Self::empty();
        let flate = config.flate_level;
        let (quality, lgwin) = (config.brotli_quality, config.brotli_lgwin);
        let zstd_level = config.zstd_level;
        let buffer_size = config.buffer_size;

        registry.register(BLANK, codecs::identity_writer);
        registry.register(IDENTITY, codecs::identity_writer);
        registry.register(GZIP, move |inner| codecs::gzip_writer(inner, flate));
        registry.register(ZLIB, move |inner| codecs::zlib_writer(inner, flate));
        registry.register(BROTLI, move |inner| codecs::brotli_writer(inner, quality, lgwin, buffer_size));
        registry.register(DEFLATE, move |inner| codecs::deflate_writer(inner, flate));
        registry.register(COMPRESS, move |inner| codecs::lzw_writer(inner, buffer_size));
        registry.register(ZSTD, move |inner| codecs::zstd_writer(inner, zstd_level));
        registry
    }

    /// Insert or replace a factory, returning the previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Option<CompressionFactory>
    where
        F: for<'a> Fn(BoxedEncoder<'a>) -> io::Result<BoxedEncoder<'a>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory))
    }

    pub fn remove(&mut self, name: &str) -> Option<CompressionFactory> {
        self.factories.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&CompressionFactory> {
        self.factories.get(name)
    }

    /// Lookup that reports unknown names as `"<name> is not supported"`.
    pub fn lookup(&self, index: usize, name: &str) -> Result<&CompressionFactory, PipelineError> {
        self.get(name)
            .ok_or_else(|| PipelineError::Unsupported { index, name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl DecompressionRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared built-in registry with default codec parameters.
    pub fn builtin() -> &'static DecompressionRegistry {
        static BUILTIN: OnceLock<DecompressionRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| DecompressionRegistry::from_config(&CodecConfig::default()))
    }

    /// Decoders only use the buffer size; levels do not affect decoding.
    pub fn from_config(config: &CodecConfig) -> Self {
        let mut registry = Self::empty();
        let buffer_size = config.buffer_size;

        registry.register(BLANK, codecs::identity_reader);
        registry.register(IDENTITY, codecs::identity_reader);
        registry.register(GZIP, codecs::gzip_reader);
        registry.register(ZLIB, codecs::zlib_reader);
        registry.register(BROTLI, move |inner| codecs::brotli_reader(inner, buffer_size));
        registry.register(DEFLATE, codecs::deflate_reader);
        registry.register(COMPRESS, move |inner| codecs::lzw_reader(inner, buffer_size));
        registry.register(ZSTD, codecs::zstd_reader);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Option<DecompressionFactory>
    where
        F: for<'a> Fn(BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory))
    }

    pub fn remove(&mut self, name: &str) -> Option<DecompressionFactory> {
        self.factories.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&DecompressionFactory> {
        self.factories.get(name)
    }

    pub fn lookup(&self, index: usize, name: &str) -> Result<&DecompressionFactory, PipelineError> {
        self.get(name)
            .ok_or_else(|| PipelineError::Unsupported { index, name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for CompressionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionRegistry").field("names", &self.names()).finish()
    }
}

impl fmt::Debug for DecompressionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompressionRegistry").field("names", &self.names()).finish()
    }
}
