//! Action engine.
//!
//! Owns the registry and the two collaborator slots (external UI bridge and
//! logger) and exposes the registration and query surface. Queries never
//! fail: anything going wrong inside client code shows up as a missing
//! action plus a logger entry.
//!
//! The engine may be queried from several threads. Two batches only exclude
//! each other when they share a calculator instance, since a calculator's
//! start and finish hooks must pair up before it joins another batch.

use std::collections::HashSet;
use std::sync::Arc;

use actuator_core::{Logger, Slot, StateValue};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::descriptor::ActionDescriptor;
use crate::error::ActionError;
use crate::executable::ExecutableAction;
use crate::pipeline::{calculator_keys, run_batch};
use crate::registry::ActionRegistry;
use crate::types::{ActionMetadata, UiMode, VisibilityFilter};
use crate::ui::{Completion, ExternalUiBridge, TriggerContext};

const COMPONENT: &str = "engine";

/// Registry plus collaborators, queried by hosts.
pub struct ActionEngine {
    registry: RwLock<ActionRegistry>,
    bridge: Arc<Slot<dyn ExternalUiBridge>>,
    logger: Arc<Slot<dyn Logger>>,
    /// Calculator instances held by running batches.
    busy_calculators: Mutex<HashSet<usize>>,
}

impl Default for ActionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionEngine {
    /// An engine with no bridge (local UI mode) and the no-op logger.
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(ActionRegistry::new()),
            bridge: Arc::new(Slot::empty()),
            logger: Arc::new(Slot::empty()),
            busy_calculators: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_logger(self, logger: Arc<dyn Logger>) -> Self {
        self.logger.set(logger);
        self
    }

    pub fn with_external_ui_bridge(self, bridge: Arc<dyn ExternalUiBridge>) -> Self {
        self.bridge.set(bridge);
        self
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register `action`. Returns false when its name is already taken; the
    /// first registration stays.
    pub fn add_action(&self, action: ActionDescriptor) -> bool {
        self.registry.write().register(action)
    }

    /// Register a plain action without a calculator. The id is the name.
    pub fn add_simple_action<I, S, F>(
        &self,
        name: impl Into<String>,
        category: I,
        target: impl Into<String>,
        on_click: F,
        should_display: Option<VisibilityFilter>,
    ) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Option<&StateValue>, Option<&StateValue>) + Send + Sync + 'static,
    {
        let action = ActionDescriptor::new(name, target, on_click)
            .with_category(category)
            .with_visibility_filter(should_display);
        self.add_action(action)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Actions for `target` that pass their filters right now, in
    /// registration order.
    pub fn calculate_current_actions(&self, target: &str) -> Vec<ExecutableAction> {
        let actions = self.registry.read().for_target(target);
        self.batch(actions)
    }

    /// Metadata of every registered action, without running anything.
    pub fn all_available_actions(&self) -> Vec<ActionMetadata> {
        self.registry.read().list_all()
    }

    /// The first action registered under `id`, if it currently passes its
    /// filters.
    pub fn find_action_by_id(&self, id: &str) -> Option<ExecutableAction> {
        let action = self.registry.read().find_by_id(id);
        let Some(action) = action else {
            debug!(id, "No action registered with this id");
            return None;
        };
        self.batch(vec![action]).into_iter().next()
    }

    /// Look up `id` and trigger it. `None` when the action is unknown or
    /// currently filtered out.
    pub fn execute_action(&self, id: &str) -> Option<Completion> {
        self.find_action_by_id(id).map(|action| action.trigger())
    }

    fn batch(&self, actions: Vec<Arc<ActionDescriptor>>) -> Vec<ExecutableAction> {
        let mode = self.ui_mode();
        let keys = calculator_keys(&actions, mode);
        let Some(_guard) = BatchGuard::acquire(&self.busy_calculators, keys) else {
            let err = ActionError::NestedBatch;
            self.logger().error(&err.to_string(), COMPONENT, "batch");
            return Vec::new();
        };
        run_batch(actions, mode, &self.trigger_context())
    }

    fn trigger_context(&self) -> TriggerContext {
        TriggerContext {
            bridge: Arc::clone(&self.bridge),
            logger: Arc::clone(&self.logger),
        }
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// External when a bridge is configured, local otherwise.
    pub fn ui_mode(&self) -> UiMode {
        if self.bridge.is_set() {
            UiMode::External
        } else {
            UiMode::Local
        }
    }

    pub fn set_external_ui_bridge(&self, bridge: Arc<dyn ExternalUiBridge>) {
        self.bridge.set(bridge);
    }

    pub fn clear_external_ui_bridge(&self) -> Option<Arc<dyn ExternalUiBridge>> {
        self.bridge.clear()
    }

    pub fn set_logger(&self, logger: Arc<dyn Logger>) {
        self.logger.set(logger);
    }

    /// The configured logger, or the no-op logger.
    pub fn logger(&self) -> Arc<dyn Logger> {
        self.logger.get_or_noop()
    }
}

/// Holds a batch's calculator instances for as long as it lives.
struct BatchGuard<'a> {
    busy: &'a Mutex<HashSet<usize>>,
    keys: Vec<usize>,
}

impl<'a> BatchGuard<'a> {
    /// `None` if any of `keys` is held by another running batch.
    fn acquire(busy: &'a Mutex<HashSet<usize>>, keys: Vec<usize>) -> Option<Self> {
        let mut held = busy.lock();
        if keys.iter().any(|key| held.contains(key)) {
            return None;
        }
        held.extend(keys.iter().copied());
        Some(Self { busy, keys })
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.busy.lock();
        for key in &self.keys {
            held.remove(key);
        }
    }
}
