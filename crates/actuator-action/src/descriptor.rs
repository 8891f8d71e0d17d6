//! Action descriptors.

use std::fmt;
use std::sync::Arc;

use actuator_core::StateValue;

use crate::calculator::ContextStateCalculator;
use crate::types::{ActionCallback, ActionMetadata, StateConverter, UiMode, VisibilityFilter};
use crate::ui::{ExternalUiDisplay, LocalUiDisplay};

/// How an action interacts with the user once triggered.
#[derive(Clone)]
pub enum ActionKind {
    /// Runs its callback immediately.
    Plain,
    /// Displays an in-process UI first.
    LocalUi(Arc<dyn LocalUiDisplay>),
    /// Ships UI code to the external bridge first.
    ExternalUi(Arc<dyn ExternalUiDisplay>),
}

impl ActionKind {
    pub fn has_ui(&self) -> bool {
        !matches!(self, ActionKind::Plain)
    }

    /// Whether the action can run when the runtime displays UIs in `mode`.
    pub fn supported_in(&self, mode: UiMode) -> bool {
        match self {
            ActionKind::Plain => true,
            ActionKind::LocalUi(_) => mode == UiMode::Local,
            ActionKind::ExternalUi(_) => mode == UiMode::External,
        }
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Plain => write!(f, "Plain"),
            ActionKind::LocalUi(_) => write!(f, "LocalUi"),
            ActionKind::ExternalUi(_) => write!(f, "ExternalUi"),
        }
    }
}

/// A registered action.
///
/// Built once by the contributing module and immutable after registration.
/// The id defaults to the name.
#[derive(Clone)]
pub struct ActionDescriptor {
    id: String,
    name: String,
    target: String,
    category: Vec<String>,
    label: Option<String>,
    calculator: Option<Arc<dyn ContextStateCalculator>>,
    visibility: Option<VisibilityFilter>,
    on_click: ActionCallback,
    ui_converter: Option<StateConverter>,
    kind: ActionKind,
}

impl ActionDescriptor {
    /// A plain action with no calculator and no visibility filter.
    pub fn new<F>(name: impl Into<String>, target: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(Option<&StateValue>, Option<&StateValue>) + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            target: target.into(),
            category: Vec::new(),
            label: None,
            calculator: None,
            visibility: None,
            on_click: Arc::new(on_click),
            ui_converter: None,
            kind: ActionKind::Plain,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Category path, outermost first.
    pub fn with_category<I, S>(mut self, category: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = category.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ContextStateCalculator>) -> Self {
        self.calculator = Some(calculator);
        self
    }

    pub fn with_visibility<F>(mut self, filter: F) -> Self
    where
        F: Fn(Option<&StateValue>) -> bool + Send + Sync + 'static,
    {
        self.visibility = Some(Arc::new(filter));
        self
    }

    pub(crate) fn with_visibility_filter(mut self, filter: Option<VisibilityFilter>) -> Self {
        self.visibility = filter;
        self
    }

    /// Display `display` in-process before running the callback.
    pub fn with_local_ui(mut self, display: Arc<dyn LocalUiDisplay>) -> Self {
        self.kind = ActionKind::LocalUi(display);
        self
    }

    /// Ship `display` through the external bridge before running the callback.
    pub fn with_external_ui(mut self, display: Arc<dyn ExternalUiDisplay>) -> Self {
        self.kind = ActionKind::ExternalUi(display);
        self
    }

    /// Convert the context state before handing it to the UI. Ignored for
    /// plain actions.
    pub fn with_ui_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(Option<&StateValue>) -> Option<StateValue> + Send + Sync + 'static,
    {
        self.ui_converter = Some(Arc::new(converter));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn category(&self) -> &[String] {
        &self.category
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn calculator(&self) -> Option<&Arc<dyn ContextStateCalculator>> {
        self.calculator.as_ref()
    }

    pub fn visibility(&self) -> Option<&VisibilityFilter> {
        self.visibility.as_ref()
    }

    pub fn on_click(&self) -> &ActionCallback {
        &self.on_click
    }

    pub fn ui_converter(&self) -> Option<&StateConverter> {
        self.ui_converter.as_ref()
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn has_ui(&self) -> bool {
        self.kind.has_ui()
    }

    pub fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            target: self.target.clone(),
            category: self.category.clone(),
            label: self.label.clone(),
            has_ui: self.has_ui(),
        }
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("target", &self.target)
            .field("category", &self.category)
            .field("label", &self.label)
            .field("has_calculator", &self.calculator.is_some())
            .field("has_visibility", &self.visibility.is_some())
            .field("kind", &self.kind)
            .finish()
    }
}
