//! Menu contributors and their items.

use std::fmt;
use std::sync::Arc;

use actuator_action::{ActionEngine, Completion, CompletionOutcome};

/// What a menu entry does when clicked.
pub type MenuCallback = Arc<dyn Fn() -> Completion + Send + Sync>;

/// One flat contribution: a leaf name under a category path.
#[derive(Clone)]
pub struct MenuItem {
    pub name: String,
    /// Category path, outermost first. Empty puts the leaf at the root.
    pub categories: Vec<String>,
    /// Host-side routing key, copied onto the nodes the item creates.
    pub selector: Option<String>,
    pub on_click: MenuCallback,
}

impl MenuItem {
    /// An item whose callback finishes as soon as it returns.
    pub fn new<F>(name: impl Into<String>, on_click: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::with_completion(name, move || {
            on_click();
            Completion::ready(CompletionOutcome::Completed)
        })
    }

    /// An item whose callback may finish later.
    pub fn with_completion<F>(name: impl Into<String>, on_click: F) -> Self
    where
        F: Fn() -> Completion + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            categories: Vec::new(),
            selector: None,
            on_click: Arc::new(on_click),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("name", &self.name)
            .field("categories", &self.categories)
            .field("selector", &self.selector)
            .finish()
    }
}

/// A source of menu items, asked afresh on every menu display.
pub trait MenuContributor: Send + Sync {
    fn id(&self) -> &str;

    fn calculate_items(&self) -> Vec<MenuItem>;

    /// Called on every contributor before any `calculate_items`.
    fn calculation_started(&self) {}

    /// Called on every contributor after all `calculate_items`.
    fn calculation_finished(&self) {}
}

/// Exposes the actions the engine offers for one target as menu items.
pub struct ActionMenuContributor {
    id: String,
    engine: Arc<ActionEngine>,
    target: String,
    selector: Option<String>,
}

impl ActionMenuContributor {
    pub fn new(
        id: impl Into<String>,
        engine: Arc<ActionEngine>,
        target: impl Into<String>,
        selector: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            engine,
            target: target.into(),
            selector,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl MenuContributor for ActionMenuContributor {
    fn id(&self) -> &str {
        &self.id
    }

    fn calculate_items(&self) -> Vec<MenuItem> {
        self.engine
            .calculate_current_actions(&self.target)
            .into_iter()
            .map(|action| {
                let name = action.display_label().to_string();
                let categories = action.category().to_vec();
                let mut item = MenuItem::with_completion(name, move || action.trigger())
                    .with_categories(categories);
                item.selector = self.selector.clone();
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuator_action::{ActionDescriptor, TARGET_EDITOR_NODE, TARGET_TREE_VIEWER_NODE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_item_builder() {
        let item = MenuItem::new("Copy", || {})
            .with_categories(["Edit"])
            .with_selector("atom-text-editor");

        assert_eq!(item.categories, vec!["Edit"]);
        assert_eq!(item.selector.as_deref(), Some("atom-text-editor"));
        assert_eq!((item.on_click)().outcome(), Some(CompletionOutcome::Completed));
    }

    #[test]
    fn test_action_contributor_maps_actions() {
        let engine = Arc::new(ActionEngine::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = calls.clone();
        engine.add_action(
            ActionDescriptor::new("delete-node", TARGET_EDITOR_NODE, move |_, _| {
                sink.fetch_add(1, Ordering::SeqCst);
            })
            .with_category(["Refactor"])
            .with_label("Delete node"),
        );
        engine.add_action(ActionDescriptor::new("other", TARGET_TREE_VIEWER_NODE, |_, _| {}));

        let contributor = ActionMenuContributor::new(
            "actions",
            engine,
            TARGET_EDITOR_NODE,
            Some(".editor".to_string()),
        );
        let items = contributor.calculate_items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Delete node");
        assert_eq!(items[0].categories, vec!["Refactor"]);
        assert_eq!(items[0].selector.as_deref(), Some(".editor"));

        (items[0].on_click)();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
