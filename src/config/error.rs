//! Configuration and manifest loading errors.

/// Errors raised while loading or validating configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO-related errors (file access, permissions, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration validation errors
    #[error("Configuration validation error: {0}")]
    Validation(String),

    /// Unknown log level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
