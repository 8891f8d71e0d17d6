//! Context state calculators.
//!
//! A calculator produces the state one batch of actions works with. Several
//! actions may share one calculator instance; the pipeline then calls the
//! instance's hooks once per batch, not once per action.

use std::sync::Arc;

use actuator_core::StateValue;

use crate::error::ActionError;

/// Computes the context state for a batch.
pub trait ContextStateCalculator: Send + Sync {
    /// Compute the state. `None` means there is no state for this batch.
    fn calculate(&self) -> Result<Option<StateValue>, ActionError>;

    /// Called once per batch before any `calculate`.
    fn calculation_started(&self) -> Result<(), ActionError> {
        Ok(())
    }

    /// Called once per batch after every `calculate`. Cached state may be
    /// released here.
    fn calculation_finished(&self) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Identity of a calculator instance.
pub(crate) fn instance_key(calculator: &Arc<dyn ContextStateCalculator>) -> *const () {
    Arc::as_ptr(calculator) as *const ()
}

/// Calculator that never produces state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCalculator;

impl ContextStateCalculator for NullCalculator {
    fn calculate(&self) -> Result<Option<StateValue>, ActionError> {
        Ok(None)
    }
}

/// Calculator backed by a closure, without lifecycle hooks.
pub struct FnCalculator<F> {
    calculate: F,
}

impl<F> ContextStateCalculator for FnCalculator<F>
where
    F: Fn() -> Result<Option<StateValue>, ActionError> + Send + Sync,
{
    fn calculate(&self) -> Result<Option<StateValue>, ActionError> {
        (self.calculate)()
    }
}

/// Wrap a closure as a shareable calculator.
pub fn calculator_fn<F>(calculate: F) -> Arc<dyn ContextStateCalculator>
where
    F: Fn() -> Result<Option<StateValue>, ActionError> + Send + Sync + 'static,
{
    Arc::new(FnCalculator { calculate })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_calculator() {
        let calculator = NullCalculator;
        assert!(calculator.calculate().unwrap().is_none());
        assert!(calculator.calculation_started().is_ok());
        assert!(calculator.calculation_finished().is_ok());
    }

    #[test]
    fn test_fn_calculator() {
        let calculator = calculator_fn(|| Ok(Some(StateValue::new(42u32))));
        let state = calculator.calculate().unwrap().unwrap();
        assert_eq!(state.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_instance_key_tracks_identity() {
        let first: Arc<dyn ContextStateCalculator> = Arc::new(NullCalculator);
        let alias = Arc::clone(&first);
        let second = calculator_fn(|| Ok(None));
        assert_eq!(instance_key(&first), instance_key(&alias));
        assert_ne!(instance_key(&first), instance_key(&second));
    }
}
