//! Context-sensitive actions and menus.
//!
//! [`ActionSystem`] is the entry point: contributors register actions and
//! menu contributors on it, hosts query it for what applies right now.
//! Each system is self-contained, so tests and embedders can run as many
//! side by side as they like.

pub mod labels;
pub mod system;

pub use labels::categorized_label;
pub use system::{ActionSystem, ActionSystemBuilder};

pub use actuator_action::{
    ActionDescriptor, ActionMetadata, Completion, CompletionOutcome, ContextStateCalculator,
    ExecutableAction, ExternalUiBridge, ExternalUiDisplay, FileUiCode, LocalUiDisplay,
    TARGET_EDITOR_NODE, TARGET_TREE_VIEWER_NODE,
};
pub use actuator_core::{ActuatorConfig, ActuatorError, Logger, StateValue};
pub use actuator_menu::{MenuContributor, MenuItem, MenuNode};
pub use actuator_context::{
    AstStateCalculator, CachedStateCalculator, DerivedStateCalculator, GeneralAstState,
};
