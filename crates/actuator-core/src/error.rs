use thiserror::Error;

/// Top-level error type shared by the actuator crates.
///
/// Subsystem crates define their own error types and implement
/// `From<ActuatorError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActuatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("UI code unavailable: {0}")]
    UiCode(String),

    #[error("No document change executor configured")]
    DocumentChangeUnavailable,
}

impl From<toml::de::Error> for ActuatorError {
    fn from(err: toml::de::Error) -> Self {
        ActuatorError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ActuatorError {
    fn from(err: toml::ser::Error) -> Self {
        ActuatorError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ActuatorError {
    fn from(err: serde_json::Error) -> Self {
        ActuatorError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for actuator operations.
pub type Result<T> = std::result::Result<T, ActuatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ActuatorError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = ActuatorError::DocumentChangeUnavailable;
        assert_eq!(err.to_string(), "No document change executor configured");

        let err = ActuatorError::UiCode("no path".to_string());
        assert_eq!(err.to_string(), "UI code unavailable: no path");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ActuatorError = io_err.into();
        assert!(matches!(err, ActuatorError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: ActuatorError = parsed.unwrap_err().into();
        assert!(matches!(err, ActuatorError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let err: ActuatorError = parsed.unwrap_err().into();
        assert!(matches!(err, ActuatorError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
