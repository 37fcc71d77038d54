//! compression/codecs/mod.rs
//! Concrete codec layers behind the registry factories.
//!
//! Every factory takes the current outermost layer by value and returns the
//! new outermost layer. A factory fails only when its parameters are out of
//! range or the codec cannot allocate its context.

pub mod brotli;
pub mod flate;
pub mod identity;
pub mod lzw;
pub mod zstd;

pub use self::brotli::{brotli_reader, brotli_writer};
pub use self::flate::{deflate_reader, deflate_writer, gzip_reader, gzip_writer, zlib_reader, zlib_writer};
pub use self::identity::{identity_reader, identity_writer, Destination, Source};
pub use self::lzw::{lzw_reader, lzw_writer};
pub use self::zstd::{zstd_reader, zstd_writer};
