//! compression/codecs/identity.rs
//! Pass-through layers and the terminal layers around the caller's stream.
//!
//! Design notes:
//! - `Destination`/`Source` sit at the bottom of every chain. They never
//!   expose a finalize capability, so close never touches the caller's stream.
//! - `Destination` discards writes while detached. The compressor keeps it
//!   detached during construction and after close, so codec drop
//!   handlers cannot leak bytes into the caller's sink.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::compression::types::{BoxedDecoder, BoxedEncoder, DecodeLayer, EncodeLayer};
use crate::telemetry::PipelineCounters;

/// Terminal write-side layer wrapping the caller's sink.
pub struct Destination<'a> {
    sink: Box<dyn Write + Send + 'a>,
    attached: Arc<AtomicBool>,
    counters: Arc<PipelineCounters>,
}

impl<'a> Destination<'a> {
    pub fn new<W: Write + Send + 'a>(
        sink: W,
        attached: Arc<AtomicBool>,
        counters: Arc<PipelineCounters>,
    ) -> Self {
        Self { sink: Box::new(sink), attached, counters }
    }
}

impl Write for Destination<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.attached.load(Ordering::Acquire) {
            return Ok(buf.len());
        }
        let n = self.sink.write(buf)?;
        self.counters.add_encoded(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.attached.load(Ordering::Acquire) {
            return Ok(());
        }
        self.sink.flush()
    }
}

impl EncodeLayer for Destination<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        None
    }
}

/// Terminal read-side layer wrapping the caller's source.
pub struct Source<'a> {
    source: Box<dyn Read + Send + 'a>,
    counters: Arc<PipelineCounters>,
}

impl<'a> Source<'a> {
    pub fn new<R: Read + Send + 'a>(source: R, counters: Arc<PipelineCounters>) -> Self {
        Self { source: Box::new(source), counters }
    }
}

impl Read for Source<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read(buf)?;
        self.counters.add_encoded(n);
        Ok(n)
    }
}

impl DecodeLayer for Source<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        None
    }
}

/// `identity` on the write side.
pub struct IdentityWriter<'a> {
    inner: BoxedEncoder<'a>,
}

impl Write for IdentityWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl EncodeLayer for IdentityWriter<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer> {
        Some(self.inner.as_mut())
    }
}

/// `identity` on the read side.
pub struct IdentityReader<'a> {
    inner: BoxedDecoder<'a>,
}

impl Read for IdentityReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl DecodeLayer for IdentityReader<'_> {
    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer> {
        Some(self.inner.as_mut())
    }
}

pub fn identity_writer<'a>(inner: BoxedEncoder<'a>) -> io::Result<BoxedEncoder<'a>> {
    Ok(Box::new(IdentityWriter { inner }))
}

pub fn identity_reader<'a>(inner: BoxedDecoder<'a>) -> io::Result<BoxedDecoder<'a>> {
    Ok(Box::new(IdentityReader { inner }))
}
