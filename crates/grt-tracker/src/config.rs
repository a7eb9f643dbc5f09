// config.rs - Tracker configuration from .grt/config.toml.
//
// Every field has a default, so an empty or missing file yields a working
// configuration: mock suggestions with the standard latency, stale results
// discarded, colors on, logs at info.

use std::path::{Path, PathBuf};

use grt_suggest::ProviderConfig;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::session::StaleResultPolicy;

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Suggestion provider selection.
    #[serde(default)]
    pub suggestions: ProviderConfig,

    /// Session behavior.
    #[serde(default)]
    pub session: SessionConfig,

    /// Display / output configuration.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Session behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// What to do with suggestions that arrive after the selection changed.
    #[serde(default)]
    pub stale_results: StaleResultPolicy,
}

/// Display / output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Render principle accent colors in the terminal UI.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file. The terminal UI never logs to the terminal, so without a
    /// file its logs are dropped.
    pub file: Option<PathBuf>,

    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_level(),
        }
    }
}

// Serde default functions
fn default_color() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl TrackerConfig {
    /// Standard config location for a project: `<root>/.grt/config.toml`.
    pub fn path_for_project(project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(".grt").join("config.toml")
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let content = std::fs::read_to_string(path).map_err(|e| TrackerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| TrackerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Try to load config, returning the default if the file doesn't exist
    /// or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{}; using defaults", e);
            Self::default()
        })
    }
}
