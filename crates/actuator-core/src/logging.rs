//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns `false` if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
