//! Engine configuration and validation.
//!
//! # Invariants
//! - `worker_threads` never exceeds `MAX_WORKER_THREADS`.
//! - A configured default language is a non-blank tag.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Upper bound for the batch worker pool.
pub const MAX_WORKER_THREADS: usize = 64;
const DEFAULT_WORKER_THREADS: usize = 4;

/// Runtime settings shared by the services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Display language used when a caller passes none.
    ///
    /// `None` defers to the catalog default language.
    pub default_language: Option<String>,
    /// Batch pool size; `0` or `1` runs batches on the caller thread.
    pub worker_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            ConfigError::Read(format!("failed to read `{}`: {err}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::TooManyWorkers(self.worker_threads));
        }
        if let Some(lang) = &self.default_language {
            if lang.trim().is_empty() {
                return Err(ConfigError::BlankLanguage);
            }
        }
        Ok(())
    }

    /// Picks the caller's language, falling back to the configured default.
    pub fn display_language<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested
            .filter(|lang| !lang.trim().is_empty())
            .or(self.default_language.as_deref())
    }
}

/// Configuration rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read(String),
    Parse(String),
    TooManyWorkers(usize),
    BlankLanguage,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(message) => write!(f, "{message}"),
            Self::Parse(message) => write!(f, "invalid engine config: {message}"),
            Self::TooManyWorkers(count) => write!(
                f,
                "worker_threads {count} exceeds the maximum of {MAX_WORKER_THREADS}"
            ),
            Self::BlankLanguage => write!(f, "default_language cannot be blank"),
        }
    }
}

impl Error for ConfigError {}
