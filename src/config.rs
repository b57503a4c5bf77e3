//! semdiff configuration management.
//!
//! Handles the optional configuration file at:
//! - Linux: ~/.config/semdiff/config.toml
//! - macOS: ~/Library/Application Support/semdiff/config.toml
//! - Windows: %APPDATA%\semdiff\config.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemdiffError};
use crate::lang::{FormatterCommand, GrammarRegistry};

/// semdiff configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SemdiffConfig {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Normalization settings
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Formatter argv per file extension. An empty argv removes the formatter.
    #[serde(default)]
    pub formatters: BTreeMap<String, Vec<String>>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Run the formatter before parsing
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl SemdiffConfig {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("semdiff").join("config.toml"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SemdiffError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        Self::parse(&content).map_err(|e| match e {
            SemdiffError::Config { message } => SemdiffError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SemdiffError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SemdiffError::Config {
                message: format!(
                    "Invalid log level: {}. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Build the grammar registry with this config's formatter overrides
    pub fn registry(&self) -> GrammarRegistry {
        let mut registry = GrammarRegistry::default();
        for (ext, argv) in &self.formatters {
            if !registry.set_formatter(ext, FormatterCommand::from_argv(argv)) {
                tracing::warn!("ignoring formatter for unsupported extension '{}'", ext);
            }
        }
        registry
    }
}
