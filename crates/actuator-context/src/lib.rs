//! Context-state calculators built on the action engine.
//!
//! [`CachedStateCalculator`] computes once per batch and serves the same
//! value to every action sharing it. [`AstStateCalculator`] applies that to
//! "what is the cursor pointing at" in the current editor, and
//! [`DerivedStateCalculator`] lets individual actions build on its snapshot.

pub mod ast_state;
pub mod cache;
pub mod derived;
pub mod provider;

pub use ast_state::{AstStateCalculator, AstStateSource, GeneralAstState};
pub use cache::{CachedStateCalculator, StateSource};
pub use derived::DerivedStateCalculator;
pub use provider::{normalize_offset, EditorAstProvider};
