//! UI resolution.
//!
//! Triggering a UI-bearing action displays its UI (in-process, or through
//! the external bridge) and runs the completion callback once the UI
//! resolves. Plain actions run the callback right away.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use actuator_core::{ActuatorError, Deferred, Logger, Outcome, Slot, StateValue};

use crate::descriptor::{ActionDescriptor, ActionKind};
use crate::error::{ActionError, Stage};
use crate::guard::guarded;

const COMPONENT: &str = "ui";

/// In-process UI. Starts from the initial UI state and resolves with the
/// state the user produced.
pub trait LocalUiDisplay: Send + Sync {
    fn display(&self, initial: Option<StateValue>) -> Deferred<StateValue>;
}

impl<F> LocalUiDisplay for F
where
    F: Fn(Option<StateValue>) -> Deferred<StateValue> + Send + Sync,
{
    fn display(&self, initial: Option<StateValue>) -> Deferred<StateValue> {
        self(initial)
    }
}

/// UI that runs outside the process. Knows how to produce portable UI code,
/// not how to run it.
pub trait ExternalUiDisplay: Send + Sync {
    fn create_ui_code(&self, initial: Option<&StateValue>) -> Result<String, ActuatorError>;
}

/// Runs external UI code and adapts it to the deferred contract.
pub trait ExternalUiBridge: Send + Sync {
    fn display(
        &self,
        ui: Arc<dyn ExternalUiDisplay>,
        initial: Option<StateValue>,
    ) -> Deferred<StateValue>;
}

/// External UI code given inline or read from a file at trigger time.
#[derive(Debug, Clone)]
pub struct FileUiCode {
    path: Option<PathBuf>,
    content: Option<String>,
}

impl FileUiCode {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            content: None,
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            path: None,
            content: Some(content.into()),
        }
    }

    /// Non-empty inline content wins over the path when both are present.
    pub fn new(path: Option<PathBuf>, content: Option<String>) -> Self {
        Self { path, content }
    }
}

impl ExternalUiDisplay for FileUiCode {
    fn create_ui_code(&self, _initial: Option<&StateValue>) -> Result<String, ActuatorError> {
        if let Some(content) = self.content.as_ref().filter(|content| !content.is_empty()) {
            return Ok(content.clone());
        }
        match &self.path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Err(ActuatorError::UiCode(
                "neither inline code nor a path was given".to_string(),
            )),
        }
    }
}

// =============================================================================
// Completion
// =============================================================================

/// How a triggered action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The callback ran.
    Completed,
    /// The UI was dismissed without a result; the callback did not run.
    Abandoned,
    /// Client code failed; details went to the logger.
    Failed,
}

/// Handle on a triggered action.
///
/// Already finished for plain actions. For UI actions it finishes once the
/// UI resolves and the callback has run; it must be awaited for that to
/// happen.
pub struct Completion {
    state: CompletionState,
}

enum CompletionState {
    Ready(CompletionOutcome),
    Waiting(Pin<Box<dyn Future<Output = CompletionOutcome> + Send>>),
}

impl Completion {
    pub fn ready(outcome: CompletionOutcome) -> Self {
        Self {
            state: CompletionState::Ready(outcome),
        }
    }

    pub fn waiting(future: impl Future<Output = CompletionOutcome> + Send + 'static) -> Self {
        Self {
            state: CompletionState::Waiting(Box::pin(future)),
        }
    }

    /// The outcome, if already known without awaiting.
    pub fn outcome(&self) -> Option<CompletionOutcome> {
        match self.state {
            CompletionState::Ready(outcome) => Some(outcome),
            CompletionState::Waiting(_) => None,
        }
    }
}

impl Future for Completion {
    type Output = CompletionOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            CompletionState::Ready(outcome) => Poll::Ready(*outcome),
            CompletionState::Waiting(future) => match future.as_mut().poll(cx) {
                Poll::Ready(outcome) => {
                    this.state = CompletionState::Ready(outcome);
                    Poll::Ready(outcome)
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("outcome", &self.outcome())
            .finish()
    }
}

// =============================================================================
// Trigger
// =============================================================================

/// Collaborators read at the moment an action is triggered.
#[derive(Clone)]
pub(crate) struct TriggerContext {
    pub(crate) bridge: Arc<Slot<dyn ExternalUiBridge>>,
    pub(crate) logger: Arc<Slot<dyn Logger>>,
}

/// Run the action bound to `state`.
pub(crate) fn trigger(
    action: &Arc<ActionDescriptor>,
    state: Option<StateValue>,
    context: &TriggerContext,
) -> Completion {
    let logger = context.logger.get_or_noop();
    match action.kind() {
        ActionKind::Plain => {
            Completion::ready(run_callback(action, logger.as_ref(), state.as_ref(), None))
        }
        ActionKind::LocalUi(display) => {
            let display = Arc::clone(display);
            let pending = initial_ui_state(action, state.as_ref())
                .and_then(|initial| guarded(Stage::Display, || Ok(display.display(initial))));
            await_ui(action, state, pending, logger)
        }
        ActionKind::ExternalUi(display) => {
            let Some(bridge) = context.bridge.get() else {
                let err = ActionError::DisplayUnavailable {
                    action: action.name().to_string(),
                };
                logger.error(&err.to_string(), COMPONENT, "trigger");
                return Completion::ready(CompletionOutcome::Failed);
            };
            let display = Arc::clone(display);
            let pending = initial_ui_state(action, state.as_ref()).and_then(|initial| {
                guarded(Stage::Display, || Ok(bridge.display(display, initial)))
            });
            await_ui(action, state, pending, logger)
        }
    }
}

fn initial_ui_state(
    action: &ActionDescriptor,
    state: Option<&StateValue>,
) -> Result<Option<StateValue>, ActionError> {
    match action.ui_converter() {
        Some(converter) => guarded(Stage::Display, || Ok(converter(state))),
        None => Ok(state.cloned()),
    }
}

fn await_ui(
    action: &Arc<ActionDescriptor>,
    state: Option<StateValue>,
    pending: Result<Deferred<StateValue>, ActionError>,
    logger: Arc<dyn Logger>,
) -> Completion {
    let pending = match pending {
        Ok(pending) => pending,
        Err(err) => {
            logger.error(
                &format!("Failed to display UI for {}: {}", action.name(), err),
                COMPONENT,
                "display",
            );
            return Completion::ready(CompletionOutcome::Failed);
        }
    };

    let action = Arc::clone(action);
    Completion::waiting(async move {
        match pending.await {
            Outcome::Resolved(ui_state) => {
                run_callback(&action, logger.as_ref(), state.as_ref(), Some(&ui_state))
            }
            Outcome::Abandoned => {
                logger.debug(
                    &format!("UI for {} closed without a result", action.name()),
                    COMPONENT,
                    "display",
                );
                CompletionOutcome::Abandoned
            }
        }
    })
}

fn run_callback(
    action: &ActionDescriptor,
    logger: &dyn Logger,
    state: Option<&StateValue>,
    ui_state: Option<&StateValue>,
) -> CompletionOutcome {
    let on_click = action.on_click();
    match guarded(Stage::Callback, || {
        on_click(state, ui_state);
        Ok(())
    }) {
        Ok(()) => CompletionOutcome::Completed,
        Err(err) => {
            logger.error(
                &format!("Action {} failed: {}", action.name(), err),
                COMPONENT,
                "callback",
            );
            CompletionOutcome::Failed
        }
    }
}
