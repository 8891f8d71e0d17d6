//! Shared types for the action engine.

use std::fmt;
use std::sync::Arc;

use actuator_core::StateValue;
use serde::{Deserialize, Serialize};

/// Target tag for actions applying to a node under the editor cursor.
pub const TARGET_EDITOR_NODE: &str = "TARGET_EDITOR_NODE";

/// Target tag for actions applying to a node selected in a tree viewer.
pub const TARGET_TREE_VIEWER_NODE: &str = "TARGET_TREE_VIEWER_NODE";

/// Completion callback. Receives the context state and, for UI actions, the
/// state the user produced.
pub type ActionCallback = Arc<dyn Fn(Option<&StateValue>, Option<&StateValue>) + Send + Sync>;

/// Decides from the context state whether an action is offered.
pub type VisibilityFilter = Arc<dyn Fn(Option<&StateValue>) -> bool + Send + Sync>;

/// Converts context state into the initial state a UI starts from.
pub type StateConverter = Arc<dyn Fn(Option<&StateValue>) -> Option<StateValue> + Send + Sync>;

/// Which kind of UI the runtime can currently display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiMode {
    /// No external bridge: UIs are displayed in-process.
    Local,
    /// An external bridge is configured: UIs are shipped out as code.
    External,
}

impl fmt::Display for UiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiMode::Local => write!(f, "local"),
            UiMode::External => write!(f, "external"),
        }
    }
}

/// Read-only projection of a registered action, safe to hand to surfaces
/// that only list commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub id: String,
    pub name: String,
    pub target: String,
    pub category: Vec<String>,
    pub label: Option<String>,
    /// Whether running the action displays a UI first.
    pub has_ui: bool,
}
