//! Menu trees built from contributors and from the action engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actuator_action::{ActionDescriptor, ActionEngine, TARGET_EDITOR_NODE};
use actuator_menu::{ActionMenuContributor, MenuAggregator, MenuContributor, MenuItem};

struct Fixed {
    id: &'static str,
    items: Vec<MenuItem>,
}

impl MenuContributor for Fixed {
    fn id(&self) -> &str {
        self.id
    }

    fn calculate_items(&self) -> Vec<MenuItem> {
        self.items.clone()
    }
}

fn counting_item(name: &str, path: [&str; 2], calls: &Arc<AtomicUsize>) -> MenuItem {
    let calls = calls.clone();
    MenuItem::new(name, move || {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .with_categories(path)
}

#[test]
fn test_later_contribution_owns_the_leaf() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let aggregator = MenuAggregator::new();
    aggregator.register_contributor(Arc::new(Fixed {
        id: "one",
        items: vec![counting_item("X", ["A", "B"], &first)],
    }));
    aggregator.register_contributor(Arc::new(Fixed {
        id: "two",
        items: vec![counting_item("X", ["A", "B"], &second)],
    }));

    let tree = aggregator.calculate_menu_items_tree();

    assert_eq!(tree.len(), 1);
    let b = tree[0].descendant(&["B"]).unwrap();
    assert_eq!(b.children.len(), 1);
    b.children[0].trigger();
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_action_contributor_follows_engine_filters() {
    let engine = Arc::new(ActionEngine::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let sink = calls.clone();
    engine.add_action(
        ActionDescriptor::new("Insert resource", TARGET_EDITOR_NODE, move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .with_category(["RAML", "Insert"]),
    );
    engine.add_action(
        ActionDescriptor::new("Hidden", TARGET_EDITOR_NODE, |_, _| {})
            .with_category(["RAML", "Insert"])
            .with_visibility(|_| false),
    );

    let aggregator = MenuAggregator::new();
    aggregator.register_contributor(Arc::new(ActionMenuContributor::new(
        "actions",
        engine.clone(),
        TARGET_EDITOR_NODE,
        None,
    )));
    aggregator.register_contributor(Arc::new(Fixed {
        id: "static",
        items: vec![MenuItem::new("Settings", || {}).with_categories(["RAML"])],
    }));

    let tree = aggregator.calculate_menu_items_tree();
    let raml = &tree[0];
    assert_eq!(raml.name, "RAML");
    let names: Vec<_> = raml.children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Insert", "Settings"]);

    let insert = raml.child("Insert").unwrap();
    assert_eq!(insert.children.len(), 1);
    insert.children[0].trigger();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
