//! compression/codecs/brotli.rs
//! Brotli (`br`) layers.
//!
//! Design notes:
//! - brotli's writer only completes its stream when consumed, so finalize
//!   moves the encoder out and keeps the released inner layer for the walk.
//! - `into_inner` discards the result of writing the final meta-block. The
//!   encoder writes through `LatchedWriter`, which keeps the first error so
//!   finalize can report it.

use std::io::{self, Read, Write};

use crate::compression::config::{check_brotli, check_buffer_size};
use crate::compression::types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer};

/// Pass-through writer that remembers the first write/flush failure.
struct LatchedWriter<'a> {
    inner: BoxedEncoder<'a>,
    error: Option<io::Error>,
}

impl LatchedWriter<'_> {
    fn latch<T>(&mut self, result: io::Result<T>) -> io::Result<T> {
        if let Err(err) = &result {
            if self.error.is_none() {
                self.error = Some(io::Error::new(err.kind(), err.to_string()));
            }
        }
        result
    }
}

impl Write for LatchedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buf);
        self.latch(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = self.inner.flush();
        self.latch(result)
    }
}

pub struct BrotliWriter<'a> {
    encoder: Option<brotli::CompressorWriter<LatchedWriter<'a>>>,
    released: Option<BoxedEncoder<'a>>,
}

impl Write for BrotliWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.encoder.as_mut() {
            Some(enc) => enc.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "br layer already finalized")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match (self.encoder.as_mut(), self.released.as_mut()) {
            (Some(enc), _) => enc.flush(),
            (None, Some(inner)) => inner.flush(),
            (None, None) => Ok(()),
        }
    }
}

impl EncodeLayer for BrotliWriter<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        let Some(mut enc) = self.encoder.take() else {
            return Ok(());
        };
        let flushed = enc.flush();
        let LatchedWriter { inner, error } = enc.into_inner();
        self.released = Some(inner);
        flushed?;
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        match (self.encoder.as_mut(), self.released.as_mut()) {
            (Some(enc), _) => Some(enc.get_mut().inner.as_mut()),
            (None, Some(inner)) => Some(inner.as_mut()),
            (None, None) => None,
        }
    }
}

pub struct BrotliReader<'a> {
    decoder: Option<brotli::Decompressor<BoxedDecoder<'a>>>,
    released: Option<BoxedDecoder<'a>>,
}

impl Read for BrotliReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.decoder.as_mut() {
            Some(dec) => dec.read(buf),
            None => Ok(0),
        }
    }
}

impl DecodeLayer for BrotliReader<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        if let Some(dec) = self.decoder.take() {
            self.released = Some(dec.into_inner());
        }
        Ok(())
    }

    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        match (self.decoder.as_mut(), self.released.as_mut()) {
            (Some(dec), _) => Some(dec.get_mut().as_mut()),
            (None, Some(inner)) => Some(inner.as_mut()),
            (None, None) => None,
        }
    }
}

pub fn brotli_writer<'a>(
    inner: BoxedEncoder<'a>,
    quality: u32,
    lgwin: u32,
    buffer_size: usize,
) -> io::Result<BoxedEncoder<'a>> {
    check_brotli(quality, lgwin)?;
    check_buffer_size(buffer_size)?;
    let latched = LatchedWriter { inner, error: None };
    let encoder = brotli::CompressorWriter::new(latched, buffer_size, quality, lgwin);
    Ok(Box::new(BrotliWriter { encoder: Some(encoder), released: None }))
}

pub fn brotli_reader<'a>(inner: BoxedDecoder<'a>, buffer_size: usize) -> io::Result<BoxedDecoder<'a>> {
    check_buffer_size(buffer_size)?;
    let decoder = brotli::Decompressor::new(inner, buffer_size);
    Ok(Box::new(BrotliReader { decoder: Some(decoder), released: None }))
}
