//! compression/constants.rs
//! Encoding names and codec defaults.

/// Registry keys, aligned with HTTP `Content-Encoding` tokens.
pub mod encoding_names {
    pub const BLANK: &str = "";
    pub const IDENTITY: &str = "identity";
    pub const GZIP: &str = "gzip";
    pub const ZLIB: &str = "zlib";
    pub const DEFLATE: &str = "deflate";
    pub const BROTLI: &str = "br";
    pub const COMPRESS: &str = "compress";
    pub const ZSTD: &str = "zstd";

    /// Every built-in key, in registration order.
    pub const BUILTIN: &[&str] = &[BLANK, IDENTITY, GZIP, ZLIB, BROTLI, DEFLATE, COMPRESS, ZSTD];
}

/// flate2 default (6) for gzip, zlib and raw deflate.
pub const DEFAULT_LEVEL_FLATE: u32 = 6;
pub const MAX_LEVEL_FLATE: u32 = 9;

/// Brotli quality/window defaults.
pub const DEFAULT_QUALITY_BROTLI: u32 = 6;
pub const MAX_QUALITY_BROTLI: u32 = 11;
pub const DEFAULT_LGWIN_BROTLI: u32 = 22;
pub const MIN_LGWIN_BROTLI: u32 = 10;
pub const MAX_LGWIN_BROTLI: u32 = 24;

/// Zstd level 0 selects the library default (3).
pub const DEFAULT_LEVEL_ZSTD: i32 = 0;

/// LZW literal width for the legacy `compress` coding (LSB order).
pub const LZW_LITERAL_WIDTH: u8 = 8;

/// Internal buffer size for codecs that take one (brotli, LZW).
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024; // 4 KiB
pub const MIN_BUFFER_SIZE: usize = 512;
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024; // 1 MiB
