//! Errors raised while assembling [`Settings`](super::Settings).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` or the `--config` file is absent.
    #[error("Required configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration path is not UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error(
        "FORKFUL_CONFIG_DIR and FORKFUL_CONFIG_FILE cannot both be set. \
         Use FORKFUL_CONFIG_DIR for layered configuration or \
         FORKFUL_CONFIG_FILE for a single configuration file."
    )]
    ConflictingSources,

    #[error(
        "Unknown environment '{value}' in FORKFUL_APP_ENV; \
         expected development, test, staging or production"
    )]
    UnknownEnvironment { value: String },

    /// Merged sources do not fit the `Settings` shape.
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(#[source] config::ConfigError),

    /// A setting parsed but its value is unusable, e.g. a short JWT secret.
    #[error("Invalid setting {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the offending setting, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}
