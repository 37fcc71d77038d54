//! compression/types.rs
//! Layer traits, boxed chain handles and pipeline errors.
//!
//! Design notes:
//! - Every realized layer owns the layer it wraps; the destination/source sits
//!   at the bottom of the chain inside a terminal layer.
//! - Finalization is an explicit capability (`has_finalize`), so pass-through
//!   layers and the caller's stream are skipped rather than closed.
//! - `inner_mut` lets the pipelines walk from the most recently constructed
//!   layer toward the caller's stream one layer at a time.

use std::io::{self, Read, Write};
use std::sync::Arc;

use thiserror::Error;

/// Boxed write-side layer. The lifetime ties the chain to the destination.
pub type BoxedEncoder<'a> = Box<dyn EncodeLayer + 'a>;

/// Boxed read-side layer. The lifetime ties the chain to the source.
pub type BoxedDecoder<'a> = Box<dyn DecodeLayer + 'a>;

/// One realized compression layer.
pub trait EncodeLayer: Write + Send {
    /// Whether this layer has anything to finalize.
    fn has_finalize(&self) -> bool {
        false
    }

    /// Emit trailing codec state into the wrapped writer.
    ///
    /// Must leave the wrapped writer itself untouched: finishing layer `i`
    /// never finishes layer `i - 1`.
    fn finalize(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// The layer this one writes into, `None` for the terminal destination.
    fn inner_mut(&mut self) -> Option<&mut dyn EncodeLayer>;
}

/// One realized decompression layer.
pub trait DecodeLayer: Read + Send {
    fn has_finalize(&self) -> bool {
        false
    }

    /// Release codec state. Reads after finalize see end of stream.
    fn finalize(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// The layer this one reads from, `None` for the terminal source.
    fn inner_mut(&mut self) -> Option<&mut dyn DecodeLayer>;
}

/// Pipeline failures, attributed to a layer index/name where one exists.
///
/// `Clone` so a failed init state can be replayed to later callers.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Configuration error: the order names an encoding the registry lacks.
    #[error("{name} is not supported")]
    Unsupported { index: usize, name: String },

    /// A factory failed to build its layer.
    #[error("layer[{index}:{name}] construction failed: {source}")]
    Construction {
        index: usize,
        name: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// A layer's finalize failed during close.
    #[error("layer[{index}:{name}] finalize failed: {source}")]
    Finalize {
        index: usize,
        name: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// Underlying read/write failure.
    #[error("pipeline i/o failed: {0}")]
    Io(#[source] Arc<io::Error>),

    #[error("pipeline is closed")]
    Closed,
}

impl PipelineError {
    pub(crate) fn construction(index: usize, name: &str, source: io::Error) -> Self {
        PipelineError::Construction { index, name: name.to_string(), source: Arc::new(source) }
    }

    pub(crate) fn finalize(index: usize, name: &str, source: io::Error) -> Self {
        PipelineError::Finalize { index, name: name.to_string(), source: Arc::new(source) }
    }

    /// Layer index the error is attributed to, if any.
    pub fn layer_index(&self) -> Option<usize> {
        match self {
            PipelineError::Unsupported { index, .. }
            | PipelineError::Construction { index, .. }
            | PipelineError::Finalize { index, .. } => Some(*index),
            PipelineError::Io(_) | PipelineError::Closed => None,
        }
    }

    /// `io::ErrorKind` used when the error crosses a `Read`/`Write` seam.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            PipelineError::Unsupported { .. } => io::ErrorKind::Unsupported,
            PipelineError::Construction { .. } => io::ErrorKind::InvalidInput,
            PipelineError::Finalize { source, .. } | PipelineError::Io(source) => source.kind(),
            PipelineError::Closed => io::ErrorKind::Other,
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(e: io::Error) -> Self {
        // Errors raised by a pipeline and carried through a Read/Write seam.
        if let Some(pipeline) = e.get_ref().and_then(|inner| inner.downcast_ref::<PipelineError>()) {
            return pipeline.clone();
        }
        PipelineError::Io(Arc::new(e))
    }
}

impl From<PipelineError> for io::Error {
    fn from(e: PipelineError) -> Self {
        io::Error::new(e.kind(), e)
    }
}
