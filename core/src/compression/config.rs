//! compression/config.rs
//! Codec parameters for configured registries.
//!
//! Summary: `CodecConfig` carries the tunables of the built-in codecs. It is
//! checked up front with `validate()`, and the configured factories re-check
//! their own parameter when a layer is built, so a bad value surfaces as a
//! construction error attributed to that layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{codec} level {level} out of range {min}..={max}")]
    LevelOutOfRange { codec: &'static str, level: i64, min: i64, max: i64 },

    #[error("brotli window {lgwin} out of range {min}..={max}")]
    WindowOutOfRange { lgwin: u32, min: u32, max: u32 },

    #[error("buffer size {size} out of range {min}..={max}")]
    BufferOutOfRange { size: usize, min: usize, max: usize },

    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the built-in codecs. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Level shared by gzip, zlib and raw deflate.
    pub flate_level: u32,
    pub brotli_quality: u32,
    pub brotli_lgwin: u32,
    pub zstd_level: i32,
    /// Internal buffer for brotli and LZW layers.
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            flate_level: DEFAULT_LEVEL_FLATE,
            brotli_quality: DEFAULT_QUALITY_BROTLI,
            brotli_lgwin: DEFAULT_LGWIN_BROTLI,
            zstd_level: DEFAULT_LEVEL_ZSTD,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CodecConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_flate_level(self.flate_level)?;
        check_brotli(self.brotli_quality, self.brotli_lgwin)?;
        check_zstd_level(self.zstd_level)?;
        check_buffer_size(self.buffer_size)
    }
}

pub(crate) fn check_flate_level(level: u32) -> Result<(), ConfigError> {
    if level > MAX_LEVEL_FLATE {
        return Err(ConfigError::LevelOutOfRange {
            codec: "flate",
            level: level as i64,
            min: 0,
            max: MAX_LEVEL_FLATE as i64,
        });
    }
    Ok(())
}

pub(crate) fn check_brotli(quality: u32, lgwin: u32) -> Result<(), ConfigError> {
    if quality > MAX_QUALITY_BROTLI {
        return Err(ConfigError::LevelOutOfRange {
            codec: "br",
            level: quality as i64,
            min: 0,
            max: MAX_QUALITY_BROTLI as i64,
        });
    }
    if !(MIN_LGWIN_BROTLI..=MAX_LGWIN_BROTLI).contains(&lgwin) {
        return Err(ConfigError::WindowOutOfRange {
            lgwin,
            min: MIN_LGWIN_BROTLI,
            max: MAX_LGWIN_BROTLI,
        });
    }
    Ok(())
}

pub(crate) fn check_zstd_level(level: i32) -> Result<(), ConfigError> {
    // Negative levels are zstd's fast modes; 0 selects the library default.
    let range = zstd::compression_level_range();
    if !range.contains(&level) {
        return Err(ConfigError::LevelOutOfRange {
            codec: "zstd",
            level: level as i64,
            min: *range.start() as i64,
            max: *range.end() as i64,
        });
    }
    Ok(())
}

pub(crate) fn check_buffer_size(size: usize) -> Result<(), ConfigError> {
    if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&size) {
        return Err(ConfigError::BufferOutOfRange {
            size,
            min: MIN_BUFFER_SIZE,
            max: MAX_BUFFER_SIZE,
        });
    }
    Ok(())
}

impl From<ConfigError> for std::io::Error {
    fn from(e: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}
