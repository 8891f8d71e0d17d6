//! Host-facing diagnostics channel.
//!
//! The engine never surfaces failures to its callers; detail goes to a
//! [`Logger`] the host installs. [`NoopLogger`] is what runs when nothing
//! was installed.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::slot::Slot;

/// Diagnostics sink implemented by the host.
pub trait Logger: Send + Sync {
    /// Debug-level message.
    fn debug(&self, message: &str, component: &str, sub_component: &str);

    /// Detailed debug message, more verbose than [`Logger::debug`].
    fn debug_detail(&self, message: &str, component: &str, sub_component: &str);

    /// Error message.
    fn error(&self, message: &str, component: &str, sub_component: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _component: &str, _sub_component: &str) {}

    fn debug_detail(&self, _message: &str, _component: &str, _sub_component: &str) {}

    fn error(&self, _message: &str, _component: &str, _sub_component: &str) {}
}

impl Slot<dyn Logger> {
    /// The installed logger, or a [`NoopLogger`] when none is installed.
    pub fn get_or_noop(&self) -> Arc<dyn Logger> {
        self.get().unwrap_or_else(|| Arc::new(NoopLogger))
    }
}

/// Forwards to `tracing`: debug, trace and error respectively.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, component: &str, sub_component: &str) {
        debug!(component, sub_component, "{}", message);
    }

    fn debug_detail(&self, message: &str, component: &str, sub_component: &str) {
        trace!(component, sub_component, "{}", message);
    }

    fn error(&self, message: &str, component: &str, sub_component: &str) {
        error!(component, sub_component, "{}", message);
    }
}

/// Severity of a recorded [`LogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    DebugDetail,
    Error,
}

/// One message captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
    pub component: String,
    pub sub_component: String,
}

/// Keeps every message in memory, for hosts that render diagnostics
/// themselves and for tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Recorded entries with the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.severity == severity)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, severity: Severity, message: &str, component: &str, sub_component: &str) {
        self.entries.lock().push(LogEntry {
            severity,
            message: message.to_string(),
            component: component.to_string(),
            sub_component: sub_component.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str, component: &str, sub_component: &str) {
        self.push(Severity::Debug, message, component, sub_component);
    }

    fn debug_detail(&self, message: &str, component: &str, sub_component: &str) {
        self.push(Severity::DebugDetail, message, component, sub_component);
    }

    fn error(&self, message: &str, component: &str, sub_component: &str) {
        self.push(Severity::Error, message, component, sub_component);
    }
}
