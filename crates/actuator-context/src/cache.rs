//! Per-batch state caching.

use std::sync::atomic::{AtomicUsize, Ordering};

use actuator_action::{ActionError, ContextStateCalculator};
use actuator_core::StateValue;
use parking_lot::Mutex;
use tracing::trace;

/// The expensive computation behind a [`CachedStateCalculator`].
pub trait StateSource: Send + Sync {
    fn compute(&self) -> Result<Option<StateValue>, ActionError>;
}

impl<F> StateSource for F
where
    F: Fn() -> Result<Option<StateValue>, ActionError> + Send + Sync,
{
    fn compute(&self) -> Result<Option<StateValue>, ActionError> {
        self()
    }
}

/// Computes its state at batch start and serves it until batch finish.
///
/// The cached outcome includes "no state": a source returning `None` is not
/// asked again within the batch. A cache left over from a batch that never
/// finished is reused as-is.
pub struct CachedStateCalculator<S> {
    source: S,
    cache: Mutex<Option<Option<StateValue>>>,
    computations: AtomicUsize,
}

impl<S: StateSource> CachedStateCalculator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
            computations: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_cached(&self) -> bool {
        self.cache.lock().is_some()
    }

    /// How many times the source has run.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    fn cached_or_compute(&self) -> Result<Option<StateValue>, ActionError> {
        if let Some(cached) = self.cache.lock().as_ref() {
            return Ok(cached.clone());
        }

        let computed = self.source.compute()?;
        self.computations.fetch_add(1, Ordering::Relaxed);
        trace!(has_state = computed.is_some(), "Computed context state");

        let mut cache = self.cache.lock();
        Ok(cache.get_or_insert(computed).clone())
    }
}

impl<S: StateSource> ContextStateCalculator for CachedStateCalculator<S> {
    /// Normally served from the cache filled by `calculation_started`.
    fn calculate(&self) -> Result<Option<StateValue>, ActionError> {
        self.cached_or_compute()
    }

    fn calculation_started(&self) -> Result<(), ActionError> {
        self.cached_or_compute().map(|_| ())
    }

    fn calculation_finished(&self) -> Result<(), ActionError> {
        self.cache.lock().take();
        Ok(())
    }
}
