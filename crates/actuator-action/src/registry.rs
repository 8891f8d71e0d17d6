//! Registered action store.

use std::sync::Arc;

use tracing::debug;

use crate::descriptor::ActionDescriptor;
use crate::types::ActionMetadata;

/// Actions in registration order.
///
/// Names are unique: a second action with a name already present is
/// dropped. Ids are not checked.
#[derive(Debug, Default, Clone)]
pub struct ActionRegistry {
    actions: Vec<Arc<ActionDescriptor>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action`. Returns false if its name was already taken.
    pub fn register(&mut self, action: ActionDescriptor) -> bool {
        if self.actions.iter().any(|a| a.name() == action.name()) {
            debug!(action = action.name(), "Ignoring duplicate action");
            return false;
        }
        debug!(action = action.name(), action_target = action.target(), "Registered action");
        self.actions.push(Arc::new(action));
        true
    }

    pub fn list_all(&self) -> Vec<ActionMetadata> {
        self.actions.iter().map(|a| a.metadata()).collect()
    }

    /// First registered action with `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Arc<ActionDescriptor>> {
        self.actions.iter().find(|a| a.id() == id).cloned()
    }

    pub fn for_target(&self, target: &str) -> Vec<Arc<ActionDescriptor>> {
        self.actions
            .iter()
            .filter(|a| a.target() == target)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Arc<ActionDescriptor>> {
        self.actions.clone()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
