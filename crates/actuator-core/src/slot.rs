//! Overwritable configuration slots.

use std::sync::Arc;

use parking_lot::RwLock;

/// A single overwritable slot holding a shared collaborator.
///
/// Readers take a snapshot of the current value; a later `set` does not
/// affect snapshots already handed out.
pub struct Slot<T: ?Sized> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Slot<T> {
    pub fn empty() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    pub fn with(value: Arc<T>) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    /// Replace the current value.
    pub fn set(&self, value: Arc<T>) {
        *self.value.write() = Some(value);
    }

    /// Empty the slot, returning the previous value.
    pub fn clear(&self) -> Option<Arc<T>> {
        self.value.write().take()
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.value.read().is_some()
    }
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
