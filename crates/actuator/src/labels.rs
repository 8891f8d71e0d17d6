//! Command-palette labels.

use actuator_action::ActionMetadata;
use actuator_core::config::LabelConfig;

/// The action's label when it has one. Otherwise the prefix, then each
/// category followed by the separator, then the name.
pub fn categorized_label(action: &ActionMetadata, config: &LabelConfig) -> String {
    if let Some(label) = &action.label {
        return label.clone();
    }

    let mut result = config.prefix.clone();
    for category in &action.category {
        result.push_str(category);
        result.push_str(&config.separator);
    }
    result.push_str(&action.name);
    result
}
