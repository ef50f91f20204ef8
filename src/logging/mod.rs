//! Logging setup on top of the `log` facade and `env_logger`.

use log::LevelFilter;

use crate::config::{ConfigError, LoggingConfig};

/// Maps a level name (`TRACE`..`ERROR`, any case) to a filter.
pub fn level_filter(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.to_uppercase().as_str() {
        "TRACE" => Ok(LevelFilter::Trace),
        "DEBUG" => Ok(LevelFilter::Debug),
        "INFO" => Ok(LevelFilter::Info),
        "WARN" => Ok(LevelFilter::Warn),
        "ERROR" => Ok(LevelFilter::Error),
        _ => Err(ConfigError::InvalidLevel(level.to_string())),
    }
}

/// Installs the process-wide logger at the configured level.
///
/// `RUST_LOG` still refines per-module filters. Calling this twice is
/// harmless; the second logger is ignored.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = level_filter(&config.level)?;
    let installed = env_logger::Builder::from_default_env()
        .filter_level(filter)
        .try_init()
        .is_ok();
    if installed {
        log::info!("📋 Logging initialized at {}", filter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_level_names() {
        assert_eq!(level_filter("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(level_filter("ERROR").unwrap(), LevelFilter::Error);
        assert!(level_filter("verbose").is_err());
    }
}
