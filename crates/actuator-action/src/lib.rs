//! Action lifecycle engine.
//!
//! Contributors register context-sensitive actions; hosts ask which actions
//! apply right now. Each query runs one calculation batch: capability
//! filtering, calculator start hooks, state calculation, visibility
//! filtering, materialization and finish hooks.

pub mod calculator;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod executable;
pub mod guard;
pub mod pipeline;
pub mod registry;
pub mod types;
pub mod ui;

pub use calculator::{calculator_fn, ContextStateCalculator, FnCalculator, NullCalculator};
pub use descriptor::{ActionDescriptor, ActionKind};
pub use engine::ActionEngine;
pub use error::{ActionError, Stage};
pub use executable::ExecutableAction;
pub use registry::ActionRegistry;
pub use types::{
    ActionCallback, ActionMetadata, StateConverter, UiMode, VisibilityFilter,
    TARGET_EDITOR_NODE, TARGET_TREE_VIEWER_NODE,
};
pub use ui::{
    Completion, CompletionOutcome, ExternalUiBridge, ExternalUiDisplay, FileUiCode,
    LocalUiDisplay,
};
