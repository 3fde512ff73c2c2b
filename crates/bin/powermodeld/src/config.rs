//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `powermodel.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use powermodel_domain::power_device::MergePolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where extracted facts are read from.
    pub facts: FactsConfig,
    /// Extraction behaviour.
    pub extraction: ExtractionConfig,
    /// Reload bus settings.
    pub reload: ReloadConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Facts source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FactsConfig {
    /// Path of the TOML facts document.
    pub path: PathBuf,
}

/// Extraction configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How facts naming an already-known state are combined.
    pub merge_policy: MergePolicy,
}

/// Reload bus configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Number of pending ontology events kept for the reloader.
    pub bus_capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `powermodel.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("powermodel.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("POWERMODEL_FACTS") {
            self.facts.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("POWERMODEL_MERGE_POLICY") {
            self.extraction.merge_policy = parse_merge_policy(&val)?;
        }
        if let Ok(val) = std::env::var("POWERMODEL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.facts.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "facts path must not be empty".to_string(),
            ));
        }
        if self.reload.bus_capacity == 0 {
            return Err(ConfigError::Validation(
                "reload bus capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_merge_policy(value: &str) -> Result<MergePolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "insert_or_ignore" => Ok(MergePolicy::InsertOrIgnore),
        "merge" => Ok(MergePolicy::Merge),
        other => Err(ConfigError::Validation(format!(
            "unknown merge policy {other:?} (expected insert_or_ignore or merge)"
        ))),
    }
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("powermodel-facts.toml"),
        }
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self { bus_capacity: 16 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "powermodeld=info,powermodel_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
