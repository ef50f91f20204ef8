//! Generator configuration.
//!
//! Loaded from a TOML file; every key is optional:
//!
//! ```toml
//! pretty_headings = true
//! max_depth = 64
//! input_schema_name = "Apply_InputSchema"
//! output_schema_name = "Apply_OutputSchema"
//!
//! [logging]
//! level = "DEBUG"
//! ```

pub mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::schema::normalize::{NormalizeOptions, DEFAULT_MAX_DEPTH};

/// Log level names accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Logging section of the generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

/// Settings for one descriptor generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Reformat key-derived titles for display
    pub pretty_headings: bool,
    /// Deepest schema nesting accepted
    pub max_depth: usize,
    /// Name of the input schema under `components.schemas`
    pub input_schema_name: String,
    /// Name of the output schema under `components.schemas`
    pub output_schema_name: String,
    pub logging: LoggingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pretty_headings: false,
            max_depth: DEFAULT_MAX_DEPTH,
            input_schema_name: "Apply_InputSchema".to_string(),
            output_schema_name: "Apply_OutputSchema".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML configuration string.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::Validation(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.input_schema_name.trim().is_empty() || self.output_schema_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "schema names cannot be empty".to_string(),
            ));
        }
        if self.input_schema_name == self.output_schema_name {
            return Err(ConfigError::Validation(format!(
                "input and output schema names are both '{}'",
                self.input_schema_name
            )));
        }
        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_uppercase().as_str()) {
            return Err(ConfigError::InvalidLevel(self.logging.level.clone()));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            pretty_headings: self.pretty_headings,
            max_depth: self.max_depth,
        }
    }
}
