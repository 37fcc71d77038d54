//! compression/codecs/lzw.rs
//! Legacy `compress` coding: LZW, LSB-first codes, 8-bit literals.
//!
//! Design notes:
//! - Built on weezl's buffer API; weezl has no `Write`/`Read` adapters that
//!   wrap a sink or source, so these layers drive `encode_bytes`/`decode_bytes`
//!   directly through a scratch buffer.
//! - The stream opens with a clear code and ends with an end code; the reader
//!   stops at the end code and reports a truncated stream as `UnexpectedEof`.

use std::io::{self, Read, Write};

use weezl::{decode::Decoder, encode::Encoder, BitOrder, LzwStatus};

use crate::compression::config::check_buffer_size;
use crate::compression::constants::LZW_LITERAL_WIDTH;
use crate::compression::types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer};

fn lzw_error(kind: io::ErrorKind, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(kind, format!("lzw: {err}"))
}

pub struct LzwWriter<'a> {
    inner: BoxedEncoder<'a>,
    encoder: Encoder,
    scratch: Vec<u8>,
    finished: bool,
}

impl<'a> LzwWriter<'a> {
    pub fn new(inner: BoxedEncoder<'a>, buffer_size: usize) -> Self {
        Self {
            inner,
            encoder: Encoder::new(BitOrder::Lsb, LZW_LITERAL_WIDTH),
            scratch: vec![0u8; buffer_size],
            finished: false,
        }
    }
}

impl Write for LzwWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.finished {
            return Err(io::Error::new(io::ErrorKind::Other, "compress layer already finalized"));
        }
        let mut consumed = 0;
        while consumed < buf.len() {
            let result = self.encoder.encode_bytes(&buf[consumed..], &mut self.scratch);
            consumed += result.consumed_in;
            self.inner.write_all(&self.scratch[..result.consumed_out])?;
            if let Err(err) = result.status {
                return Err(lzw_error(io::ErrorKind::InvalidInput, err));
            }
            if result.consumed_in == 0 && result.consumed_out == 0 {
                return Err(lzw_error(io::ErrorKind::WriteZero, "encoder made no progress"));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Partial codes stay in the encoder until finalize.
        self.inner.flush()
    }
}

impl EncodeLayer for LzwWriter<'_> {
    fn has_finalize(&self) -> bool {
        true
    }

    fn finalize(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.encoder.finish();
        loop {
            let result = self.encoder.encode_bytes(&[], &mut self.scratch);
            self.inner.write_all(&self.scratch[..result.consumed_out])?;
            match result.status {
                Ok(LzwStatus::Done) => break,
                Ok(LzwStatus::Ok) => {}
                Ok(LzwStatus::NoProgress) if result.consumed_out > 0 => {}
                Ok(LzwStatus::NoProgress) => {
                    return Err(lzw_error(io::ErrorKind::WriteZero, "end code was not emitted"));
                }
                Err(err) => return Err(lzw_error(io::ErrorKind::InvalidInput, err)),
            }
        }
        self.finished = true;
        Ok(())
    }

    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        Some(self.inner.as_mut())
    }
}

pub struct LzwReader<'a> {
    inner: BoxedDecoder<'a>,
    decoder: Decoder,
    input: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
    done: bool,
}

impl<'a> LzwReader<'a> {
    pub fn new(inner: BoxedDecoder<'a>, buffer_size: usize) -> Self {
        Self {
            inner,
            decoder: Decoder::new(BitOrder::Lsb, LZW_LITERAL_WIDTH),
            input: vec![0u8; buffer_size],
            start: 0,
            end: 0,
            eof: false,
            done: false,
        }
    }
}

impl Read for LzwReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.done {
            return Ok(0);
        }
        loop {
            if self.start == self.end && !self.eof {
                let n = self.inner.read(&mut self.input)?;
                self.start = 0;
                self.end = n;
                self.eof = n == 0;
            }

            let result = self.decoder.decode_bytes(&self.input[self.start..self.end], buf);
            self.start += result.consumed_in;
            match result.status {
                Ok(LzwStatus::Done) => {
                    self.done = true;
                    return Ok(result.consumed_out);
                }
                Ok(_) if result.consumed_out > 0 => return Ok(result.consumed_out),
                Ok(_) if self.eof && self.start == self.end => {
                    return Err(lzw_error(io::ErrorKind::UnexpectedEof, "stream ended before end code"));
                }
                Ok(_) if result.consumed_in == 0 && self.start != self.end => {
                    return Err(lzw_error(io::ErrorKind::InvalidData, "decoder made no progress"));
                }
                Ok(_) => {}
                Err(err) => return Err(lzw_error(io::ErrorKind::InvalidData, err)),
            }
        }
    }
}

impl DecodeLayer for LzwReader<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        Some(self.inner.as_mut())
    }
}

pub fn lzw_writer<'a>(inner: BoxedEncoder<'a>, buffer_size: usize) -> io::Result<BoxedEncoder<'a>> {
    check_buffer_size(buffer_size)?;
    Ok(Box::new(LzwWriter::new(inner, buffer_size)))
}

pub fn lzw_reader<'a>(inner: BoxedDecoder<'a>, buffer_size: usize) -> io::Result<BoxedDecoder<'a>> {
    check_buffer_size(buffer_size)?;
    Ok(Box::new(LzwReader::new(inner, buffer_size)))
}
