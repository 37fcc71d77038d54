//! compression/writer.rs
//! Stream Compressor: an ordered chain of encoding layers over a caller sink.
//!
//! Design notes:
//! - The first name in the order is the outermost layer. Each factory wraps
//!   the previous writer, so plaintext flows last-constructed -> ... ->
//!   first-constructed -> destination. `["gzip", "br"]` emits a gzip stream
//!   whose payload is a brotli stream.
//! - Blank names are skipped before lookup and never become layers.
//! - The chain is built lazily on first write (or by `init`/`open`).
//! - Close finalizes layers from the last constructed to the first and stops
//!   at the first failure. The destination is never finalized or closed.
//! - The destination is detached while the chain is being built and once
//!   close returns; codec drop handlers then write nowhere.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::compression::codecs::Destination;
use crate::compression::registry::CompressionRegistry;
use crate::compression::state::InitGuard;
use crate::compression::types::{BoxedEncoder, EncodeLayer, PipelineError};
use crate::telemetry::{PipelineCounters, PipelineSnapshot};

/// Realized layers of one compressor.
struct EncoderChain<'a> {
    /// Outermost writer: the last layer constructed.
    top: BoxedEncoder<'a>,
    /// Layer names by construction index.
    names: Vec<String>,
}

pub struct StreamCompressor<'a> {
    order: Vec<String>,
    registry: &'a CompressionRegistry,
    guard: InitGuard<BoxedEncoder<'a>, EncoderChain<'a>>,
    attached: Arc<AtomicBool>,
    counters: Arc<PipelineCounters>,
}

impl<'a> StreamCompressor<'a> {
    /// Compressor over `destination` using the built-in registry.
    ///
    /// Pass `&mut sink` to keep ownership of the sink; it is never closed here.
    pub fn new<W, I, S>(destination: W, order: I) -> Self
    where
        W: Write + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_registry(destination, CompressionRegistry::builtin(), order)
    }

    pub fn with_registry<W, I, S>(destination: W, registry: &'a CompressionRegistry, order: I) -> Self
    where
        W: Write + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attached = Arc::new(AtomicBool::new(false));
        let counters = Arc::new(PipelineCounters::default());
        let base: BoxedEncoder<'a> =
            Box::new(Destination::new(destination, attached.clone(), counters.clone()));
        Self {
            order: order.into_iter().map(Into::into).collect(),
            registry,
            guard: InitGuard::new(base),
            attached,
            counters,
        }
    }

    /// Eager variant: builds the chain now and reports construction errors
    /// from the constructor.
    pub fn open<W, I, S>(
        destination: W,
        registry: Option<&'a CompressionRegistry>,
        order: I,
    ) -> Result<Self, PipelineError>
    where
        W: Write + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = registry.unwrap_or_else(|| CompressionRegistry::builtin());
        let compressor = Self::with_registry(destination, registry, order);
        compressor.init()?;
        Ok(compressor)
    }

    /// Build the chain if it is not built yet. Safe to call from several
    /// threads; the chain is built once and every caller sees the outcome.
    pub fn init(&self) -> Result<(), PipelineError> {
        self.guard.init_with(|base| {
            build_chain(base, &self.order, self.registry).map(|chain| {
                self.attached.store(true, Ordering::Release);
                self.counters.set_layers(chain.names.len());
                chain
            })
        })
    }

    /// Requested order, blanks included.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Number of realized layers, `None` until the chain is built.
    pub fn layer_count(&self) -> Option<usize> {
        self.guard.with_built(|chain| chain.names.len())
    }

    /// Realized layer names by construction index.
    pub fn layer_names(&self) -> Option<Vec<String>> {
        self.guard.with_built(|chain| chain.names.clone())
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        self.counters.snapshot()
    }

    /// Finalize every layer, last constructed first.
    ///
    /// Stops at the first failing layer and returns its error; layers not yet
    /// finalized are dropped without reaching the destination. A compressor
    /// that was never written to is built here so the output is still a
    /// well-formed (empty) encoded stream. Repeat calls are a no-op.
    pub fn close(&mut self) -> Result<(), PipelineError> {
        if self.guard.is_unbuilt() {
            if let Err(err) = self.init() {
                self.guard.close();
                return Err(err);
            }
        }
        let Some(mut chain) = self.guard.close() else {
            return Ok(());
        };

        let result = finalize_chain(&mut chain);
        if let Err(err) = &result {
            warn!(error = %err, "compressor close failed; dropping unfinished layers");
        }
        // Unfinished layers are dropped detached.
        self.attached.store(false, Ordering::Release);
        drop(chain);
        result
    }
}

impl Write for StreamCompressor<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.init()?;
        let chain = self.guard.built_mut()?;
        let n = chain.top.write(buf)?;
        self.counters.add_plaintext(n);
        Ok(n)
    }

    /// Flushes through every layer without finalizing any of them.
    fn flush(&mut self) -> io::Result<()> {
        if !self.guard.is_built() {
            return Ok(());
        }
        self.guard.built_mut()?.top.flush()
    }
}

fn build_chain<'a>(
    base: BoxedEncoder<'a>,
    order: &[String],
    registry: &CompressionRegistry,
) -> Result<EncoderChain<'a>, PipelineError> {
    let mut current = base;
    let mut names = Vec::new();

    for name in order.iter().filter(|name| !name.is_empty()) {
        let index = names.len();
        let factory = match registry.lookup(index, name) {
            Ok(factory) => factory,
            Err(err) => {
                warn!(index, name = %name, built = names.len(), "unknown encoding; tearing down chain");
                return Err(err);
            }
        };
        current = match factory(current) {
            Ok(layer) => layer,
            Err(source) => {
                warn!(index, name = %name, error = %source, "encoder construction failed");
                return Err(PipelineError::construction(index, name, source));
            }
        };
        debug!(index, name = %name, "encoder layer built");
        names.push(name.clone());
    }

    Ok(EncoderChain { top: current, names })
}

fn finalize_chain(chain: &mut EncoderChain<'_>) -> Result<(), PipelineError> {
    let mut cursor: Option<&mut dyn EncodeLayer> = Some(chain.top.as_mut());
    for (index, name) in chain.names.iter().enumerate().rev() {
        let Some(layer) = cursor else { break };
        if layer.has_finalize() {
            layer
                .finalize()
                .map_err(|source| PipelineError::finalize(index, name, source))?;
            debug!(index, name = %name, "encoder layer finalized");
        }
        cursor = layer.inner_mut();
    }
    Ok(())
}
