//! The action system facade.

use std::path::Path;
use std::sync::Arc;

use actuator_action::{
    ActionDescriptor, ActionEngine, ActionMetadata, Completion, ExecutableAction,
    ExternalUiBridge, UiMode, VisibilityFilter,
};
use actuator_core::document::{DocumentChange, DocumentChangeExecutor};
use actuator_core::{
    ActuatorConfig, ActuatorError, Deferred, Logger, Slot, StateValue, TracingLogger,
};
use actuator_menu::{ActionMenuContributor, MenuAggregator, MenuContributor, MenuNode};
use tracing::{debug, info};

use crate::labels::categorized_label;

/// Registration, query and menu surface over one action engine.
pub struct ActionSystem {
    config: ActuatorConfig,
    engine: Arc<ActionEngine>,
    menu: MenuAggregator,
    logger: Arc<Slot<dyn Logger>>,
    documents: Slot<dyn DocumentChangeExecutor>,
}

/// Builds an [`ActionSystem`].
#[derive(Default)]
pub struct ActionSystemBuilder {
    config: ActuatorConfig,
    logger: Option<Arc<dyn Logger>>,
    bridge: Option<Arc<dyn ExternalUiBridge>>,
    documents: Option<Arc<dyn DocumentChangeExecutor>>,
}

impl ActionSystemBuilder {
    pub fn config(mut self, config: ActuatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn external_ui_bridge(mut self, bridge: Arc<dyn ExternalUiBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn document_change_executor(mut self, executor: Arc<dyn DocumentChangeExecutor>) -> Self {
        self.documents = Some(executor);
        self
    }

    pub fn build(self) -> ActionSystem {
        let logger = self.logger.or_else(|| {
            self.config
                .logging
                .forward_to_tracing
                .then(|| Arc::new(TracingLogger) as Arc<dyn Logger>)
        });
        let logger_slot: Arc<Slot<dyn Logger>> = Arc::new(match logger {
            Some(logger) => Slot::with(logger),
            None => Slot::empty(),
        });

        let engine = ActionEngine::new();
        if let Some(logger) = logger_slot.get() {
            engine.set_logger(logger);
        }
        if let Some(bridge) = self.bridge {
            engine.set_external_ui_bridge(bridge);
        }

        let documents: Slot<dyn DocumentChangeExecutor> = Slot::empty();
        if let Some(executor) = self.documents {
            documents.set(executor);
        }

        let system = ActionSystem {
            menu: MenuAggregator::with_logger_slot(Arc::clone(&logger_slot)),
            engine: Arc::new(engine),
            logger: logger_slot,
            documents,
            config: self.config,
        };
        info!(ui_mode = %system.ui_mode(), "Action system ready");
        system
    }
}

impl Default for ActionSystem {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ActionSystem {
    pub fn builder() -> ActionSystemBuilder {
        ActionSystemBuilder::default()
    }

    pub fn new(config: ActuatorConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// A system configured from `path`, or from defaults when the file is
    /// missing or invalid.
    pub fn from_config_file(path: &Path) -> Self {
        Self::new(ActuatorConfig::load_or_default(path))
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    /// Install the tracing subscriber described by the logging config.
    /// Returns false when a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        actuator_core::logging::init(&self.config.logging)
    }

    pub fn engine(&self) -> &Arc<ActionEngine> {
        &self.engine
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn add_action(&self, action: ActionDescriptor) -> bool {
        self.engine.add_action(action)
    }

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
        self.engine
            .add_simple_action(name, category, target, on_click, should_display)
    }

    pub fn calculate_current_actions(&self, target: &str) -> Vec<ExecutableAction> {
        self.engine.calculate_current_actions(target)
    }

    pub fn all_available_actions(&self) -> Vec<ActionMetadata> {
        self.engine.all_available_actions()
    }

    pub fn find_action_by_id(&self, id: &str) -> Option<ExecutableAction> {
        self.engine.find_action_by_id(id)
    }

    pub fn execute_action(&self, id: &str) -> Option<Completion> {
        self.engine.execute_action(id)
    }

    /// Label for flat command lists, composed per the label config.
    pub fn categorized_label(&self, action: &ActionMetadata) -> String {
        categorized_label(action, &self.config.labels)
    }

    // =========================================================================
    // Menus
    // =========================================================================

    pub fn register_contributor(&self, contributor: Arc<dyn MenuContributor>) {
        self.menu.register_contributor(contributor);
    }

    pub fn calculate_menu_items_tree(&self) -> Vec<MenuNode> {
        self.menu.calculate_menu_items_tree()
    }

    /// Expose the actions for `target` in the menu. Without a selector the
    /// configured one is used. Calling again replaces the previous setup.
    pub fn initialize_action_based_menu(&self, target: &str, selector: Option<&str>) {
        let selector = selector
            .map(str::to_string)
            .or_else(|| self.config.menu.selector.clone());
        debug!(action_target = target, ?selector, "Initializing action based menu");
        self.menu.register_contributor(Arc::new(ActionMenuContributor::new(
            self.config.menu.action_contributor_id.clone(),
            Arc::clone(&self.engine),
            target,
            selector,
        )));
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    pub fn ui_mode(&self) -> UiMode {
        self.engine.ui_mode()
    }

    pub fn set_external_ui_bridge(&self, bridge: Arc<dyn ExternalUiBridge>) {
        self.engine.set_external_ui_bridge(bridge);
    }

    pub fn clear_external_ui_bridge(&self) -> Option<Arc<dyn ExternalUiBridge>> {
        self.engine.clear_external_ui_bridge()
    }

    pub fn set_logger(&self, logger: Arc<dyn Logger>) {
        self.logger.set(Arc::clone(&logger));
        self.engine.set_logger(logger);
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        self.logger.get_or_noop()
    }

    pub fn set_document_change_executor(&self, executor: Arc<dyn DocumentChangeExecutor>) {
        self.documents.set(executor);
    }

    /// Hand `change` to the document change executor configured right now.
    pub fn change_document(&self, change: DocumentChange) -> Result<Deferred<()>, ActuatorError> {
        let executor = self
            .documents
            .get()
            .ok_or(ActuatorError::DocumentChangeUnavailable)?;
        debug!(uri = %change.uri, "Requesting document change");
        Ok(executor.change_document(change))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuator_action::TARGET_EDITOR_NODE;
    use actuator_core::{MemoryLogger, Outcome, Severity};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingExecutor {
        changes: Mutex<Vec<DocumentChange>>,
    }

    impl DocumentChangeExecutor for RecordingExecutor {
        fn change_document(&self, change: DocumentChange) -> Deferred<()> {
            self.changes.lock().push(change);
            Deferred::resolved(())
        }
    }

    #[test]
    fn test_default_logger_is_noop() {
        let system = ActionSystem::default();
        assert!(!system.logger.is_set());
        assert_eq!(system.ui_mode(), UiMode::Local);
    }

    #[test]
    fn test_forward_to_tracing() {
        let mut config = ActuatorConfig::default();
        config.logging.forward_to_tracing = true;
        let system = ActionSystem::new(config);
        assert!(system.logger.is_set());
    }

    #[test]
    fn test_set_logger_reaches_engine() {
        let system = ActionSystem::default();
        let logger = Arc::new(MemoryLogger::new());
        system.set_logger(logger.clone());
        system.add_action(ActionDescriptor::new("boom", TARGET_EDITOR_NODE, |_, _| {}).with_visibility(|_| {
            panic!("visibility exploded")
        }));

        assert!(system.calculate_current_actions(TARGET_EDITOR_NODE).is_empty());
        assert_eq!(logger.with_severity(Severity::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_change_document() {
        let system = ActionSystem::default();
        assert!(matches!(
            system.change_document(DocumentChange::new("file:///api.raml", "title: API")),
            Err(ActuatorError::DocumentChangeUnavailable)
        ));

        let executor = Arc::new(RecordingExecutor::default());
        system.set_document_change_executor(executor.clone());
        let pending = system
            .change_document(DocumentChange::new("file:///api.raml", "title: API"))
            .unwrap();

        assert!(matches!(pending.await, Outcome::Resolved(())));
        assert_eq!(executor.changes.lock()[0].uri, "file:///api.raml");
    }

    #[test]
    fn test_action_menu_uses_configured_selector() {
        let mut config = ActuatorConfig::default();
        config.menu.selector = Some(".raml-editor".to_string());
        let system = ActionSystem::new(config);
        system.add_simple_action("Validate", ["Tools"], TARGET_EDITOR_NODE, |_, _| {}, None);

        system.initialize_action_based_menu(TARGET_EDITOR_NODE, None);
        let tree = system.calculate_menu_items_tree();
        assert_eq!(tree[0].selector.as_deref(), Some(".raml-editor"));

        system.initialize_action_based_menu(TARGET_EDITOR_NODE, Some(".other"));
        let tree = system.calculate_menu_items_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].selector.as_deref(), Some(".other"));
    }
}
