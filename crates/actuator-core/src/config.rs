use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ActuatorError, Result};
use crate::types::LogLevel;

/// Top-level configuration for an action system.
///
/// Each section corresponds to one concern; every section falls back to its
/// defaults when absent from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

impl ActuatorConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ActuatorConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ActuatorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used by `logging::init` when `RUST_LOG` is unset.
    pub level: LogLevel,
    /// Install a `TracingLogger` when the host provides no logger.
    pub forward_to_tracing: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            forward_to_tracing: false,
        }
    }
}

/// How command labels are composed for surfaces listing actions flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Prepended to every composed label.
    pub prefix: String,
    /// Appended after each category segment.
    pub separator: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            prefix: "actuator:".to_string(),
            separator: ": ".to_string(),
        }
    }
}

/// Shared context-state calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// File extensions (dot included) the AST state calculator accepts.
    pub supported_extensions: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            supported_extensions: vec![".raml".to_string()],
        }
    }
}

impl ContextConfig {
    /// Whether a document path has one of the supported extensions.
    pub fn supports_path(&self, path: &str) -> bool {
        let extension = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{}", ext),
            None => return false,
        };
        self.supported_extensions.iter().any(|e| *e == extension)
    }
}

/// Built-in action menu contributor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Contributor id the action-backed contributor registers under.
    pub action_contributor_id: String,
    /// Selector copied onto every item the action contributor emits.
    pub selector: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            action_contributor_id: "actions".to_string(),
            selector: None,
        }
    }
}
