//! Error types for the action engine.

use actuator_core::ActuatorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in an action's lifecycle where client code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Started,
    Calculate,
    Visibility,
    Finished,
    Display,
    Callback,
    Contributor,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Started => write!(f, "started"),
            Stage::Calculate => write!(f, "calculate"),
            Stage::Visibility => write!(f, "visibility"),
            Stage::Finished => write!(f, "finished"),
            Stage::Display => write!(f, "display"),
            Stage::Callback => write!(f, "callback"),
            Stage::Contributor => write!(f, "contributor"),
        }
    }
}

/// Errors raised by client code running inside the engine.
///
/// None of these escape a query; they are routed to the logger and the
/// offending action is left out of the result.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("State calculation failed: {0}")]
    Calculation(String),
    #[error("Calculator {stage} hook failed: {reason}")]
    Hook { stage: Stage, reason: String },
    #[error("Panicked during {stage}: {message}")]
    Panicked { stage: Stage, message: String },
    #[error("No external UI bridge configured for action {action}")]
    DisplayUnavailable { action: String },
    #[error("A calculation batch using the same calculator is already running on this engine")]
    NestedBatch,
    #[error(transparent)]
    Core(#[from] ActuatorError),
}

impl ActionError {
    /// Shorthand for a calculation failure.
    pub fn calculation(reason: impl Into<String>) -> Self {
        ActionError::Calculation(reason.into())
    }

    /// Shorthand for a failed lifecycle hook.
    pub fn hook(stage: Stage, reason: impl Into<String>) -> Self {
        ActionError::Hook {
            stage,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_display() {
        let err = ActionError::calculation("no editor");
        assert_eq!(err.to_string(), "State calculation failed: no editor");

        let err = ActionError::hook(Stage::Finished, "cache busy");
        assert_eq!(err.to_string(), "Calculator finished hook failed: cache busy");

        let err = ActionError::Panicked {
            stage: Stage::Visibility,
            message: "index out of bounds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Panicked during visibility: index out of bounds"
        );

        let err = ActionError::DisplayUnavailable {
            action: "New method".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No external UI bridge configured for action New method"
        );
    }

    #[test]
    fn test_action_error_from_core() {
        let core = ActuatorError::UiCode("missing file".to_string());
        let err: ActionError = core.into();
        assert!(matches!(err, ActionError::Core(_)));
        assert!(err.to_string().contains("missing file"));
    }
}
