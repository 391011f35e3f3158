//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the Markdex core process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory candidates from startup arguments, in order.
    pub root_candidates: Vec<PathBuf>,

    /// Debounce window for coalesced rescans, in milliseconds.
    pub debounce_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON logging output.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_candidates: Vec::new(),
            debounce_ms: 500,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(Error::config("debounce_ms cannot be 0"));
        }

        // A window longer than this makes the live view useless.
        if self.debounce_ms > 60_000 {
            return Err(Error::config("debounce_ms cannot exceed 60000"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Get the debounce window as a `Duration`.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_debounce() {
        let config = Config {
            debounce_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("debounce_ms"));
    }

    #[test]
    fn test_validate_excessive_debounce() {
        let config = Config {
            debounce_ms: 120_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("60000"));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "invalid".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log level"));
    }

    #[test]
    fn test_all_log_levels_valid() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "Level '{level}' should be valid");
        }
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["TRACE", "Debug", "INFO", "Warn", "ERROR"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Level '{level}' should be valid (case insensitive)"
            );
        }
    }

    #[test]
    fn test_debounce_duration() {
        let config = Config {
            debounce_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.debounce(), Duration::from_millis(250));
    }
}
