use crate::config::ConfigError;
use crate::schema::types::SchemaError;
use std::fmt;
use std::io;

/// Unified error type for descriptor generation.
///
/// Schema problems are fatal for the run; rejected user functions never
/// show up here since binding only excludes them.
#[derive(Debug)]
pub enum FormError {
    /// Malformed or underspecified schema document
    Schema(SchemaError),

    /// Invalid configuration or manifest
    Config(ConfigError),

    /// Errors related to IO operations
    Io(io::Error),

    /// Errors related to serialization/deserialization
    Serialization(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "Schema error: {}", err),
            Self::Config(err) => write!(f, "Configuration error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serialization(_) => None,
        }
    }
}

impl From<SchemaError> for FormError {
    fn from(error: SchemaError) -> Self {
        FormError::Schema(error)
    }
}

impl From<ConfigError> for FormError {
    fn from(error: ConfigError) -> Self {
        FormError::Config(error)
    }
}

impl From<io::Error> for FormError {
    fn from(error: io::Error) -> Self {
        FormError::Io(error)
    }
}

impl From<serde_json::Error> for FormError {
    fn from(error: serde_json::Error) -> Self {
        FormError::Serialization(error.to_string())
    }
}

/// Result type alias for operations that can result in a FormError
pub type FormResult<T> = Result<T, FormError>;
