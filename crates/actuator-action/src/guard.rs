//! Failure isolation for client code.
//!
//! Calculators, predicates, hooks and contributors are written by other
//! parties. A panic in one of them must only cost that one action.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{ActionError, Stage};

/// Run `f`, converting a panic into [`ActionError::Panicked`].
pub fn guarded<T>(stage: Stage, f: impl FnOnce() -> Result<T, ActionError>) -> Result<T, ActionError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(ActionError::Panicked {
            stage,
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_passes_through() {
        assert_eq!(guarded(Stage::Calculate, || Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_error_passes_through() {
        let err = guarded::<()>(Stage::Calculate, || Err(ActionError::calculation("bad"))).unwrap_err();
        assert!(matches!(err, ActionError::Calculation(_)));
    }

    #[test]
    fn test_panic_is_captured() {
        let err = guarded::<()>(Stage::Visibility, || panic!("predicate exploded")).unwrap_err();
        match err {
            ActionError::Panicked { stage, message } => {
                assert_eq!(stage, Stage::Visibility);
                assert_eq!(message, "predicate exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_formatted_panic_message() {
        let err = guarded::<()>(Stage::Started, || panic!("offset {}", 12)).unwrap_err();
        assert!(err.to_string().contains("offset 12"));
    }
}
