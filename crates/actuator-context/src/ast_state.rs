//! Shared "what is the cursor pointing at" state.

use std::fmt;
use std::sync::Arc;

use actuator_action::{ActionError, ContextStateCalculator};
use actuator_core::ast::{AstModifier, AstNode, AstProvider, CompletionClassifier, CompletionKind, DocumentParser};
use actuator_core::config::ContextConfig;
use actuator_core::editor::{Editor, EditorProvider, Point};
use actuator_core::{Slot, StateValue};
use tracing::debug;

use crate::cache::{CachedStateCalculator, StateSource};
use crate::provider::EditorAstProvider;

/// Snapshot of the current editor around the cursor.
#[derive(Clone, Default)]
pub struct GeneralAstState {
    pub editor: Option<Arc<dyn Editor>>,
    /// Cursor offset in characters.
    pub offset: usize,
    pub node: Option<Arc<dyn AstNode>>,
    pub completion_kind: Option<CompletionKind>,
    pub ast_modifier: Option<Arc<dyn AstModifier>>,
}

impl GeneralAstState {
    /// The state served when no editor provider is configured.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_none() && self.node.is_none() && self.offset == 0
    }
}

impl fmt::Debug for GeneralAstState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneralAstState")
            .field("editor", &self.editor.as_ref().map(|e| e.path()))
            .field("offset", &self.offset)
            .field("node", &self.node)
            .field("completion_kind", &self.completion_kind)
            .field("has_ast_modifier", &self.ast_modifier.is_some())
            .finish()
    }
}

/// Computes [`GeneralAstState`] from the configured collaborators.
pub struct AstStateSource {
    editor_provider: Slot<dyn EditorProvider>,
    ast_provider: Slot<dyn AstProvider>,
    ast_modifier: Slot<dyn AstModifier>,
    parser: Arc<dyn DocumentParser>,
    classifier: Arc<dyn CompletionClassifier>,
    config: ContextConfig,
}

impl AstStateSource {
    fn compute_state(&self) -> Result<Option<GeneralAstState>, ActionError> {
        let Some(editors) = self.editor_provider.get() else {
            return Ok(Some(GeneralAstState::empty()));
        };
        let Some(editor) = editors.current_editor() else {
            return Ok(None);
        };
        let path = editor.path();
        if !self.config.supports_path(&path) {
            debug!(path = %path, "Unsupported document type");
            return Ok(None);
        }

        let cursor = editor.cursor_buffer_position();
        let Some(buffer) = editor.buffer() else {
            debug!(path = %path, "Editor has no buffer");
            return Ok(None);
        };
        if cursor == buffer.end_position() || cursor == Point::new(0, 0) {
            return Ok(None);
        }

        let ast_provider: Arc<dyn AstProvider> = match self.ast_provider.get() {
            Some(provider) => provider,
            None => Arc::new(EditorAstProvider::new(editors, Arc::clone(&self.parser))),
        };
        let Some(node) = ast_provider.selected_node() else {
            return Ok(None);
        };

        let offset = buffer.character_index_for_position(cursor);
        let completion_kind = self.classifier.classify(&buffer.text(), offset);

        Ok(Some(GeneralAstState {
            editor: Some(editor),
            offset,
            node: Some(node),
            completion_kind: Some(completion_kind),
            ast_modifier: self.ast_modifier.get(),
        }))
    }
}

impl StateSource for AstStateSource {
    fn compute(&self) -> Result<Option<StateValue>, ActionError> {
        Ok(self.compute_state()?.map(StateValue::new))
    }
}

/// Cached [`AstStateSource`], meant to be shared by many actions so the
/// document is parsed once per batch.
///
/// Its state is a [`GeneralAstState`]. Actions with their own state should
/// wrap it in a [`DerivedStateCalculator`](crate::DerivedStateCalculator)
/// rather than recompute it.
pub struct AstStateCalculator {
    inner: CachedStateCalculator<AstStateSource>,
}

impl AstStateCalculator {
    pub fn new(parser: Arc<dyn DocumentParser>, classifier: Arc<dyn CompletionClassifier>) -> Self {
        Self::with_config(parser, classifier, ContextConfig::default())
    }

    pub fn with_config(
        parser: Arc<dyn DocumentParser>,
        classifier: Arc<dyn CompletionClassifier>,
        config: ContextConfig,
    ) -> Self {
        Self {
            inner: CachedStateCalculator::new(AstStateSource {
                editor_provider: Slot::empty(),
                ast_provider: Slot::empty(),
                ast_modifier: Slot::empty(),
                parser,
                classifier,
                config,
            }),
        }
    }

    /// Without an editor provider every batch gets the empty state.
    pub fn set_editor_provider(&self, provider: Arc<dyn EditorProvider>) {
        self.inner.source().editor_provider.set(provider);
    }

    /// Used instead of parsing the editor text when set.
    pub fn set_ast_provider(&self, provider: Arc<dyn AstProvider>) {
        self.inner.source().ast_provider.set(provider);
    }

    pub fn set_ast_modifier(&self, modifier: Arc<dyn AstModifier>) {
        self.inner.source().ast_modifier.set(modifier);
    }

    /// The current editor, whatever the batch state.
    pub fn editor(&self) -> Option<Arc<dyn Editor>> {
        self.inner.source().editor_provider.get()?.current_editor()
    }

    /// The batch's state, typed.
    pub fn general_state(&self) -> Result<Option<Arc<GeneralAstState>>, ActionError> {
        Ok(self
            .calculate()?
            .and_then(|state| state.downcast_arc::<GeneralAstState>()))
    }

    pub fn computations(&self) -> usize {
        self.inner.computations()
    }
}

impl ContextStateCalculator for AstStateCalculator {
    fn calculate(&self) -> Result<Option<StateValue>, ActionError> {
        self.inner.calculate()
    }

    fn calculation_started(&self) -> Result<(), ActionError> {
        self.inner.calculation_started()
    }

    fn calculation_finished(&self) -> Result<(), ActionError> {
        self.inner.calculation_finished()
    }
}
