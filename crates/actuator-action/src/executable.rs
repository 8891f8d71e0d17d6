//! Materialized actions.

use std::fmt;
use std::sync::Arc;

use actuator_core::StateValue;

use crate::descriptor::ActionDescriptor;
use crate::ui::{trigger, Completion, TriggerContext};

/// An action bound to the state computed for one batch.
///
/// Triggering it later always uses that state, even if the editor moved on
/// since. The handle stays valid after the batch ends.
#[derive(Clone)]
pub struct ExecutableAction {
    descriptor: Arc<ActionDescriptor>,
    state: Option<StateValue>,
    context: TriggerContext,
}

impl ExecutableAction {
    pub(crate) fn new(
        descriptor: Arc<ActionDescriptor>,
        state: Option<StateValue>,
        context: TriggerContext,
    ) -> Self {
        Self {
            descriptor,
            state,
            context,
        }
    }

    pub fn id(&self) -> &str {
        self.descriptor.id()
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn target(&self) -> &str {
        self.descriptor.target()
    }

    pub fn category(&self) -> &[String] {
        self.descriptor.category()
    }

    pub fn label(&self) -> Option<&str> {
        self.descriptor.label()
    }

    pub fn has_ui(&self) -> bool {
        self.descriptor.has_ui()
    }

    /// State captured when the action was materialized.
    pub fn state(&self) -> Option<&StateValue> {
        self.state.as_ref()
    }

    /// Label if present, otherwise the name.
    pub fn display_label(&self) -> &str {
        self.label().unwrap_or_else(|| self.name())
    }

    /// Run the action with the captured state.
    pub fn trigger(&self) -> Completion {
        trigger(&self.descriptor, self.state.clone(), &self.context)
    }
}

impl fmt::Debug for ExecutableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableAction")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("target", &self.target())
            .field("has_state", &self.state.is_some())
            .finish()
    }
}
