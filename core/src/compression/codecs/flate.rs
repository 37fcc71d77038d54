//! compression/codecs/flate.rs
//! gzip, zlib and raw deflate layers over flate2's streaming enc/dec.
//!
//! Design notes:
//! - `deflate` is raw DEFLATE (no zlib wrapper); `zlib` carries the RFC 1950
//!   header and adler32 trailer.
//! - gzip decoding accepts concatenated members.
//! - Encoders finish with `try_finish`, which writes the trailer but leaves the
//!   wrapped layer open.

use std::io::{self, Read, Write};

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;

use crate::compression::config::check_flate_level;
use crate::compression::types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer};

pub enum FlateWriter<'a> {
    Gzip(GzEncoder<BoxedEncoder<'a>>),
    Zlib(ZlibEncoder<BoxedEncoder<'a>>),
    Deflate(DeflateEncoder<BoxedEncoder<'a>>),
}

impl Write for FlateWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FlateWriter::Gzip(enc) => enc.write(buf),
            FlateWriter::Zlib(enc) => enc.write(buf),
            FlateWriter::Deflate(enc) => enc.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FlateWriter::Gzip(enc) => enc.flush(),
            FlateWriter::Zlib(enc) => enc.flush(),
            FlateWriter::Deflate(enc) => enc.flush(),
        }
    }
}

impl EncodeLayer for FlateWriter<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        match self {
            FlateWriter::Gzip(enc) => enc.try_finish(),
            FlateWriter::Zlib(enc) => enc.try_finish(),
            FlateWriter::Deflate(enc) => enc.try_finish(),
        }
    }

    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        let inner = match self {
            FlateWriter::Gzip(enc) => enc.get_mut(),
            FlateWriter::Zlib(enc) => enc.get_mut(),
            FlateWriter::Deflate(enc) => enc.get_mut(),
        };
        Some(inner.as_mut())
    }
}

pub enum FlateReader<'a> {
    Gzip(MultiGzDecoder<BoxedDecoder<'a>>),
    Zlib(ZlibDecoder<BoxedDecoder<'a>>),
    Deflate(DeflateDecoder<BoxedDecoder<'a>>),
}

impl Read for FlateReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FlateReader::Gzip(dec) => dec.read(buf),
            FlateReader::Zlib(dec) => dec.read(buf),
            FlateReader::Deflate(dec) => dec.read(buf),
        }
    }
}

impl DecodeLayer for FlateReader<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        let inner = match self {
            FlateReader::Gzip(dec) => dec.get_mut(),
            FlateReader::Zlib(dec) => dec.get_mut(),
            FlateReader::Deflate(dec) => dec.get_mut(),
        };
        Some(inner.as_mut())
    }
}

pub fn gzip_writer<'a>(inner: BoxedEncoder<'a>, level: u32) -> io::Result<BoxedEncoder<'a>> {
    check_flate_level(level)?;
    Ok(Box::new(FlateWriter::Gzip(GzEncoder::new(inner, Compression::new(level)))))
}

pub fn zlib_writer<'a>(inner: BoxedEncoder<'a>, level: u32) -> io::Result<BoxedEncoder<'a>> {
    check_flate_level(level)?;
    Ok(Box::new(FlateWriter::Zlib(ZlibEncoder::new(inner, Compression::new(level)))))
}

pub fn deflate_writer<'a>(inner: BoxedEncoder<'a>, level: u32) -> io::Result<BoxedEncoder<'a>> {
    check_flate_level(level)?;
    Ok(Box::new(FlateWriter::Deflate(DeflateEncoder::new(inner, Compression::new(level)))))
}

pub fn gzip_reader<'a>(inner: BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> {
    Ok(Box::new(FlateReader::Gzip(MultiGzDecoder::new(inner))))
}

pub fn zlib_reader<'a>(inner: BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> {
    Ok(Box::new(FlateReader::Zlib(ZlibDecoder::new(inner))))
}

pub fn deflate_reader<'a>(inner: BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> {
    Ok(Box::new(FlateReader::Deflate(DeflateDecoder::new(inner))))
}
