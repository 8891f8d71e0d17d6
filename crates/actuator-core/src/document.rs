//! Document change requests.

use serde::{Deserialize, Serialize};

use crate::deferred::Deferred;

/// Full replacement text for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChange {
    pub uri: String,
    pub text: String,
}

impl DocumentChange {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }
}

/// Applies document changes on behalf of actions, e.g. in a remote editor.
pub trait DocumentChangeExecutor: Send + Sync {
    /// Apply `change`; the deferred resolves once the host has applied it.
    fn change_document(&self, change: DocumentChange) -> Deferred<()>;
}
