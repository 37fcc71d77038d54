//! compression/reader.rs
//! Stream Decompressor: the structural mirror of `StreamCompressor`.
//!
//! Design notes:
//! - The order is the order encodings were applied, exactly as passed to the
//!   compressor. Layer 0 wraps the source and decodes the outermost coding;
//!   each later layer wraps the previous reader.
//! - Reads go to the last constructed layer, which yields fully decoded bytes.
//! - Close walks from the last constructed layer toward the source, calling
//!   finalize where a layer has one, and stops at the first failure. The
//!   source is never closed.

use std::io::{self, Read};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::compression::codecs::Source;
use crate::compression::registry::DecompressionRegistry;
use crate::compression::state::InitGuard;
use crate::compression::types::{BoxedDecoder, DecodeLayer, PipelineError};
use crate::telemetry::{PipelineCounters, PipelineSnapshot};

struct DecoderChain<'a> {
    /// Innermost reader: the last layer constructed.
    top: BoxedDecoder<'a>,
    names: Vec<String>,
}

pub struct StreamDecompressor<'a> {
    order: Vec<String>,
    registry: &'a DecompressionRegistry,
    guard: InitGuard<BoxedDecoder<'a>, DecoderChain<'a>>,
    counters: Arc<PipelineCounters>,
}

impl<'a> StreamDecompressor<'a> {
    /// Decompressor over `source` using the built-in registry.
    pub fn new<R, I, S>(source: R, order: I) -> Self
    where
        R: Read + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_registry(source, DecompressionRegistry::builtin(), order)
    }

    pub fn with_registry<R, I, S>(source: R, registry: &'a DecompressionRegistry, order: I) -> Self
    where
        R: Read + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let counters = Arc::new(PipelineCounters::default());
        let base: BoxedDecoder<'a> = Box::new(Source::new(source, counters.clone()));
        Self {
            order: order.into_iter().map(Into::into).collect(),
            registry,
            guard: InitGuard::new(base),
            counters,
        }
    }

    /// Eager variant: builds the chain now.
    pub fn open<R, I, S>(
        source: R,
        registry: Option<&'a DecompressionRegistry>,
        order: I,
    ) -> Result<Self, PipelineError>
    where
        R: Read + Send + 'a,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = registry.unwrap_or_else(|| DecompressionRegistry::builtin());
        let decompressor = Self::with_registry(source, registry, order);
        decompressor.init()?;
        Ok(decompressor)
    }

    pub fn init(&self) -> Result<(), PipelineError> {
        self.guard.init_with(|base| {
            build_chain(base, &self.order, self.registry).map(|chain| {
                self.counters.set_layers(chain.names.len());
                chain
            })
        })
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn layer_count(&self) -> Option<usize> {
        self.guard.with_built(|chain| chain.names.len())
    }

    pub fn layer_names(&self) -> Option<Vec<String>> {
        self.guard.with_built(|chain| chain.names.clone())
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        self.counters.snapshot()
    }

    /// Finalize every layer that has a finalize capability. A decompressor
    /// that was never read from has nothing to release. Repeat calls are a
    /// no-op.
    pub fn close(&mut self) -> Result<(), PipelineError> {
        let Some(mut chain) = self.guard.close() else {
            return Ok(());
        };
        let result = finalize_chain(&mut chain);
        if let Err(err) = &result {
            warn!(error = %err, "decompressor close failed");
        }
        result
    }
}

impl Read for StreamDecompressor<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.init()?;
        let chain = self.guard.built_mut()?;
        let n = chain.top.read(buf)?;
        self.counters.add_plaintext(n);
        Ok(n)
    }
}

fn build_chain<'a>(
    base: BoxedDecoder<'a>,
    order: &[String],
    registry: &DecompressionRegistry,
) -> Result<DecoderChain<'a>, PipelineError> {
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
                warn!(index, name = %name, error = %source, "decoder construction failed");
                return Err(PipelineError::construction(index, name, source));
            }
        };
        debug!(index, name = %name, "decoder layer built");
        names.push(name.clone());
    }

    Ok(DecoderChain { top: current, names })
}

fn finalize_chain(chain: &mut DecoderChain<'_>) -> Result<(), PipelineError> {
    let mut cursor: Option<&mut dyn DecodeLayer> = Some(chain.top.as_mut());
    for (index, name) in chain.names.iter().enumerate().rev() {
        let Some(layer) = cursor else { break };
        if layer.has_finalize() {
            layer
                .finalize()
                .map_err(|source| PipelineError::finalize(index, name, source))?;
            debug!(index, name = %name, "decoder layer finalized");
        }
        cursor = layer.inner_mut();
    }
    Ok(())
}
