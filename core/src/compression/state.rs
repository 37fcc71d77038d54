//! compression/state.rs
//! Single-shot chain initialization shared by both pipelines.
//!
//! Summary: a three-state machine {Unbuilt, Built, Failed} plus a terminal
//! Closed state. The transition out of Unbuilt happens once, under a mutex;
//! an atomic phase lets later callers read the terminal state without taking
//! the lock. Mutable access to the built chain goes through `&mut self`, so
//! the borrow checker serializes reads/writes/close.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::compression::types::PipelineError;

const PHASE_UNBUILT: u8 = 0;
const PHASE_BUILT: u8 = 1;
const PHASE_FAILED: u8 = 2;
const PHASE_CLOSED: u8 = 3;

/// `S` is the unbuilt base (the wrapped caller stream), `T` the built chain.
enum ChainState<S, T> {
    Unbuilt(S),
    Built(T),
    Failed,
    Closed,
}

pub(crate) struct InitGuard<S, T> {
    phase: AtomicU8,
    failure: OnceLock<PipelineError>,
    state: Mutex<ChainState<S, T>>,
}

impl<S, T> InitGuard<S, T> {
    pub(crate) fn new(base: S) -> Self {
        Self {
            phase: AtomicU8::new(PHASE_UNBUILT),
            failure: OnceLock::new(),
            state: Mutex::new(ChainState::Unbuilt(base)),
        }
    }

    /// Fast-path view of a terminal phase; `None` while still unbuilt.
    fn settled(&self) -> Option<Result<(), PipelineError>> {
        match self.phase.load(Ordering::Acquire) {
            PHASE_BUILT => Some(Ok(())),
            PHASE_FAILED => Some(Err(self.failure.get().cloned().unwrap_or(PipelineError::Closed))),
            PHASE_CLOSED => Some(Err(PipelineError::Closed)),
            _ => None,
        }
    }

    /// Run `build` exactly once. Concurrent callers block until the first one
    /// finishes, then all observe the same outcome.
    pub(crate) fn init_with<F>(&self, build: F) -> Result<(), PipelineError>
    where
        F: FnOnce(S) -> Result<T, PipelineError>,
    {
        if let Some(settled) = self.settled() {
            return settled;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished while this one waited.
        if let Some(settled) = self.settled() {
            return settled;
        }

        let base = match std::mem::replace(&mut *state, ChainState::Failed) {
            ChainState::Unbuilt(base) => base,
            other => {
                *state = other;
                return Err(PipelineError::Closed);
            }
        };

        match build(base) {
            Ok(chain) => {
                *state = ChainState::Built(chain);
                self.phase.store(PHASE_BUILT, Ordering::Release);
                Ok(())
            }
            Err(err) => {
                let _ = self.failure.set(err.clone());
                self.phase.store(PHASE_FAILED, Ordering::Release);
                Err(err)
            }
        }
    }

    pub(crate) fn is_built(&self) -> bool {
        self.phase.load(Ordering::Acquire) == PHASE_BUILT
    }

    pub(crate) fn is_unbuilt(&self) -> bool {
        self.phase.load(Ordering::Acquire) == PHASE_UNBUILT
    }

    /// The built chain, or the terminal error if there is none.
    pub(crate) fn built_mut(&mut self) -> Result<&mut T, PipelineError> {
        let failure = self.failure.get().cloned();
        match self.state.get_mut().unwrap_or_else(PoisonError::into_inner) {
            ChainState::Built(chain) => Ok(chain),
            ChainState::Failed => Err(failure.unwrap_or(PipelineError::Closed)),
            ChainState::Unbuilt(_) | ChainState::Closed => Err(PipelineError::Closed),
        }
    }

    /// Shared view of the built chain.
    pub(crate) fn with_built<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        if !self.is_built() {
            return None;
        }
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            ChainState::Built(chain) => Some(f(chain)),
            _ => None,
        }
    }

    /// Move to Closed, handing back the built chain if there was one.
    /// Repeat calls return `None`.
    pub(crate) fn close(&mut self) -> Option<T> {
        self.phase.store(PHASE_CLOSED, Ordering::Release);
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        match std::mem::replace(state, ChainState::Closed) {
            ChainState::Built(chain) => Some(chain),
            ChainState::Unbuilt(_) | ChainState::Failed | ChainState::Closed => None,
        }
    }
}
