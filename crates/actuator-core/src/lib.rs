pub mod ast;
pub mod config;
pub mod deferred;
pub mod document;
pub mod editor;
pub mod error;
pub mod logger;
pub mod logging;
pub mod slot;
pub mod state;
pub mod types;

pub use config::ActuatorConfig;
pub use deferred::{deferred, Deferred, Outcome, Resolver};
pub use error::{ActuatorError, Result};
pub use logger::{LogEntry, Logger, MemoryLogger, NoopLogger, Severity, TracingLogger};
pub use slot::Slot;
pub use state::StateValue;
pub use types::*;
