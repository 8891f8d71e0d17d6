//! Type-erased state values.
//!
//! Context state and UI state are produced by client code the engine knows
//! nothing about, so both travel as a shared, type-erased [`StateValue`].
//! Cloning a value clones the handle, never the payload: two clones are the
//! same state by reference.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased state handle.
#[derive(Clone)]
pub struct StateValue(Arc<dyn Any + Send + Sync>);

impl StateValue {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    /// Borrow the payload as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Get a shared handle to the payload as `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).downcast::<T>().ok()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Borrow the payload as JSON, which is what externally hosted UIs exchange.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        self.downcast_ref::<serde_json::Value>()
    }

    /// Reference identity.
    pub fn ptr_eq(a: &StateValue, b: &StateValue) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&a.0) as *const (),
            Arc::as_ptr(&b.0) as *const (),
        )
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(value: serde_json::Value) -> Self {
        StateValue::new(value)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_json() {
            Some(json) => f.debug_tuple("StateValue").field(json).finish(),
            None => f.debug_tuple("StateValue").field(&"<opaque>").finish(),
        }
    }
}
