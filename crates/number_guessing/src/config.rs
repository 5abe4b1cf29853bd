//! Application configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strictly_guessing::{DEFAULT_DIFFICULTY, Difficulty};
use tracing::{debug, info, instrument};

/// Settings read from an optional TOML file and overridden by the command line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file (created if it doesn't exist).
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Built-in difficulty for new accounts.
    #[serde(default = "default_difficulty")]
    default_difficulty: String,

    /// Write logs here instead of stderr.
    #[serde(default)]
    log_file: Option<PathBuf>,

    /// Fixed seed for the computer's secrets.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_db_path() -> String {
    "number_guessing.db".to_string()
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_difficulty: default_difficulty(),
            log_file: None,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, db_path: Option<String>, seed: Option<u64>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Checks that the default difficulty names a built-in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown difficulty or an empty database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Difficulty::builtin(&self.default_difficulty).is_none() {
            return Err(ConfigError::new(format!(
                "Unknown default difficulty '{}'",
                self.default_difficulty
            )));
        }
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::new("Database path is empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_difficulty(), "Beginner");
    }

    #[test]
    fn test_values_and_overrides() {
        let config = AppConfig::from_toml(
            r#"
db_path = "games.db"
default_difficulty = "Expert"
seed = 7
"#,
        )
        .unwrap()
        .with_overrides(Some("other.db".to_string()), None);
        assert_eq!(config.db_path(), "other.db");
        assert_eq!(config.default_difficulty(), "Expert");
        assert_eq!(*config.seed(), Some(7));
    }

    #[test]
    fn test_unknown_default_difficulty_rejected() {
        let err = AppConfig::from_toml(r#"default_difficulty = "Easy""#).unwrap_err();
        assert!(err.message.contains("Easy"));
    }
}
