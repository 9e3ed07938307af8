use thiserror::Error;

/// Top-level error type for the CampusHelp system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for AssistantError` so that the `?` operator works
/// seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AssistantError {
    fn from(err: toml::de::Error) -> Self {
        AssistantError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AssistantError {
    fn from(err: toml::ser::Error) -> Self {
        AssistantError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for CampusHelp operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
