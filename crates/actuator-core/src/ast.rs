//! Document model collaborator contracts.
//!
//! Parsing and the node model belong to the host; the engine only needs to
//! find the node under the cursor and classify the cursor location.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A node of the host's parsed document.
pub trait AstNode: Send + Sync + fmt::Debug {
    /// Display name of the node, e.g. its key.
    fn name(&self) -> &str;

    /// Innermost descendant covering `offset`, if any.
    fn find_element_at_offset(&self, offset: usize) -> Option<Arc<dyn AstNode>>;
}

/// Supplies the AST of the current document.
pub trait AstProvider: Send + Sync {
    fn ast_root(&self) -> Option<Arc<dyn AstNode>>;

    /// Node the user is currently pointing at.
    fn selected_node(&self) -> Option<Arc<dyn AstNode>>;
}

/// Structural edits of the AST.
pub trait AstModifier: Send + Sync {
    fn delete_node(&self, node: &Arc<dyn AstNode>);

    fn update_text(&self, node: &Arc<dyn AstNode>);
}

/// Parses document text into an AST.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, path: &str, text: &str) -> Option<Arc<dyn AstNode>>;
}

/// What kind of completion applies at a cursor location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Value,
    Key,
    Path,
    Directive,
    Version,
    Annotation,
    SequenceKey,
    InComment,
}

/// Classifies the cursor location from the raw text.
pub trait CompletionClassifier: Send + Sync {
    fn classify(&self, text: &str, offset: usize) -> CompletionKind;
}

impl<F> CompletionClassifier for F
where
    F: Fn(&str, usize) -> CompletionKind + Send + Sync,
{
    fn classify(&self, text: &str, offset: usize) -> CompletionKind {
        self(text, offset)
    }
}
