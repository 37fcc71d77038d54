//! compression/codecs/zstd.rs
//!
//! Zstd streaming layers.
//!
//! Design notes:
//! - The writer finishes its frame with `do_finish`, which keeps the encoder
//!   (and the wrapped layer) in place.
//! - The reader's finalize frees the decompression context early; the
//!   released inner layer stays reachable for the close walk.

use std::io::{self, BufReader, Read, Write};

use zstd::stream::{read::Decoder, write::Encoder};

use crate::compression::config::check_zstd_level;
use crate::compression::types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer};

pub struct ZstdWriter<'a> {
    encoder: Encoder<'static, BoxedEncoder<'a>>,
}

impl Write for ZstdWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}

impl EncodeLayer for ZstdWriter<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        self.encoder.do_finish()
    }

    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        Some(self.encoder.get_mut().as_mut())
    }
}

pub struct ZstdReader<'a> {
    decoder: Option<Decoder<'static, BufReader<BoxedDecoder<'a>>>>,
    released: Option<BoxedDecoder<'a>>,
}

impl Read for ZstdReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.decoder.as_mut() {
            Some(dec) => dec.read(buf),
            None => Ok(0),
        }
    }
}

impl DecodeLayer for ZstdReader<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        if let Some(dec) = self.decoder.take() {
            self.released = Some(dec.finish().into_inner());
        }
        Ok(())
    }

    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        match (self.decoder.as_mut(), self.released.as_mut()) {
            (Some(dec), _) => Some(dec.get_mut().get_mut().as_mut()),
            (None, Some(inner)) => Some(inner.as_mut()),
            (None, None) => None,
        }
    }
}

pub fn zstd_writer<'a>(inner: BoxedEncoder<'a>, level: i32) -> io::Result<BoxedEncoder<'a>> {
    check_zstd_level(level)?;
    Ok(Box::new(ZstdWriter { encoder: Encoder::new(inner, level)? }))
}

pub fn zstd_reader<'a>(inner: BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> {
    Ok(Box::new(ZstdReader { decoder: Some(Decoder::new(inner)?), released: None }))
}
