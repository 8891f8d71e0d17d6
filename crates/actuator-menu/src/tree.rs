//! Menu tree construction.
//!
//! Items are merged into an arena first, addressed by index, and frozen into
//! owned [`MenuNode`]s at the end. A category segment reuses any node of the
//! same name at its level, so a leaf can also carry children.

use std::fmt;

use actuator_action::Completion;

use crate::contributor::{MenuCallback, MenuItem};

/// A node of a built menu tree. Pure category nodes have no callback.
#[derive(Clone)]
pub struct MenuNode {
    pub name: String,
    pub selector: Option<String>,
    /// Category path leading to this node, outermost first.
    pub categories: Vec<String>,
    pub on_click: Option<MenuCallback>,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn is_leaf(&self) -> bool {
        self.on_click.is_some()
    }

    /// Run the node's callback. `None` for category nodes.
    pub fn trigger(&self) -> Option<Completion> {
        self.on_click.as_ref().map(|on_click| on_click())
    }

    /// Child by name, category or leaf.
    pub fn child(&self, name: &str) -> Option<&MenuNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Follow `path` from this node.
    pub fn descendant(&self, path: &[&str]) -> Option<&MenuNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.child(head)?.descendant(rest),
        }
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("leaf", &self.is_leaf())
            .field("children", &self.children)
            .finish()
    }
}

struct ArenaNode {
    name: String,
    selector: Option<String>,
    categories: Vec<String>,
    on_click: Option<MenuCallback>,
    children: Vec<usize>,
}

#[derive(Default)]
struct Arena {
    nodes: Vec<ArenaNode>,
    roots: Vec<usize>,
}

impl Arena {
    fn level(&self, parent: Option<usize>) -> &[usize] {
        match parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }

    fn push(&mut self, parent: Option<usize>, node: ArenaNode) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn category(&mut self, parent: Option<usize>, name: &str, item: &MenuItem, depth: usize) -> usize {
        let existing = self.level(parent).iter().copied().find(|&id| self.nodes[id].name == name);
        if let Some(id) = existing {
            return id;
        }
        self.push(
            parent,
            ArenaNode {
                name: name.to_string(),
                selector: item.selector.clone(),
                categories: item.categories[..depth].to_vec(),
                on_click: None,
                children: Vec::new(),
            },
        )
    }

    fn insert(&mut self, item: &MenuItem) {
        let mut parent = None;
        for (depth, segment) in item.categories.iter().enumerate() {
            parent = Some(self.category(parent, segment, item, depth));
        }

        let existing = self.level(parent).iter().copied().find(|&id| {
            let node = &self.nodes[id];
            node.on_click.is_some() && node.name == item.name
        });
        let mut leaf = ArenaNode {
            name: item.name.clone(),
            selector: item.selector.clone(),
            categories: item.categories.clone(),
            on_click: Some(item.on_click.clone()),
            children: Vec::new(),
        };
        match existing {
            Some(id) => {
                // Items already filed under the replaced leaf stay put.
                leaf.children = std::mem::take(&mut self.nodes[id].children);
                self.nodes[id] = leaf;
            }
            None => {
                self.push(parent, leaf);
            }
        }
    }

    fn freeze(&self, id: usize) -> MenuNode {
        let node = &self.nodes[id];
        MenuNode {
            name: node.name.clone(),
            selector: node.selector.clone(),
            categories: node.categories.clone(),
            on_click: node.on_click.clone(),
            children: node.children.iter().map(|&child| self.freeze(child)).collect(),
        }
    }
}

/// Merge `items` into a forest, in order. A later leaf with the same name
/// under the same path replaces the earlier one in place.
pub fn build_tree<'a>(items: impl IntoIterator<Item = &'a MenuItem>) -> Vec<MenuNode> {
    let mut arena = Arena::default();
    for item in items {
        arena.insert(item);
    }
    arena.roots.iter().map(|&id| arena.freeze(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn item(path: &[&str], name: &str) -> MenuItem {
        MenuItem::new(name, || {}).with_categories(path.iter().copied())
    }

    fn names(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_shared_categories_merge() {
        let items = vec![
            item(&["Edit"], "Copy"),
            item(&["Edit", "Advanced"], "Join lines"),
            item(&["Edit"], "Paste"),
            item(&[], "About"),
        ];
        let tree = build_tree(&items);

        assert_eq!(names(&tree), vec!["Edit", "About"]);
        assert_eq!(names(&tree[0].children), vec!["Copy", "Advanced", "Paste"]);
        let advanced = tree[0].child("Advanced").unwrap();
        assert!(!advanced.is_leaf());
        assert_eq!(advanced.categories, vec!["Edit"]);
        assert_eq!(advanced.children[0].categories, vec!["Edit", "Advanced"]);
        assert!(tree[1].is_leaf());
    }

    #[test]
    fn test_last_leaf_wins_in_place() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));
        let (first_sink, second_sink) = (first_calls.clone(), second_calls.clone());
        let items = vec![
            MenuItem::new("X", move || {
                first_sink.fetch_add(1, Ordering::SeqCst);
            })
            .with_categories(["A", "B"]),
            item(&["A", "B"], "Y"),
            MenuItem::new("X", move || {
                second_sink.fetch_add(1, Ordering::SeqCst);
            })
            .with_categories(["A", "B"]),
        ];
        let tree = build_tree(&items);

        let b = tree[0].descendant(&["B"]).unwrap();
        assert_eq!(names(&b.children), vec!["X", "Y"]);
        b.children[0].trigger();
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_category_segment_reuses_leaf_of_same_name() {
        let items = vec![item(&[], "Refactor"), item(&["Refactor"], "Rename")];
        let tree = build_tree(&items);

        assert_eq!(names(&tree), vec!["Refactor"]);
        assert!(tree[0].is_leaf());
        assert_eq!(names(&tree[0].children), vec!["Rename"]);
    }

    #[test]
    fn test_replaced_leaf_keeps_its_children() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = calls.clone();
        let items = vec![
            item(&[], "Refactor"),
            item(&["Refactor"], "Rename"),
            MenuItem::new("Refactor", move || {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        ];
        let tree = build_tree(&items);

        assert_eq!(tree.len(), 1);
        assert_eq!(names(&tree[0].children), vec!["Rename"]);
        tree[0].trigger();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_leaf_does_not_replace_category_of_same_name() {
        let items = vec![item(&["Edit"], "Copy"), item(&[], "Edit")];
        let tree = build_tree(&items);

        assert_eq!(names(&tree), vec!["Edit", "Edit"]);
        assert!(!tree[0].is_leaf());
        assert!(tree[1].is_leaf());
    }

    #[test]
    fn test_category_takes_first_selector() {
        let items = vec![
            item(&["Edit"], "Copy").with_selector("first"),
            item(&["Edit"], "Paste").with_selector("second"),
        ];
        let tree = build_tree(&items);

        assert_eq!(tree[0].selector.as_deref(), Some("first"));
        assert_eq!(tree[0].children[1].selector.as_deref(), Some("second"));
        assert!(tree[0].trigger().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&Vec::<MenuItem>::new()).is_empty());
    }
}
