//! Configuration management for probboard

use crate::error::{ProbboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Nesting cutoff used by the thread view
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Thread settings
    pub thread: ThreadConfig,
    /// Backend settings
    pub backend: BackendConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProbboardError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ProbboardError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Write configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.thread.max_depth == 0 {
            return Err(ProbboardError::Config(
                "thread.max_depth must be at least 1".to_string(),
            ));
        }
        if self.thread.max_comment_length == 0 {
            return Err(ProbboardError::Config(
                "thread.max_comment_length must be positive".to_string(),
            ));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(ProbboardError::Config(
                "backend.base_url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Comment thread configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadConfig {
    /// Deepest level whose replies are still descended into
    pub max_depth: usize,
    /// Maximum comment content length
    pub max_comment_length: usize,
    /// Reject loads that flag more than one solution
    pub strict_single_solution: bool,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_comment_length: 10000,
            strict_single_solution: false,
        }
    }
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Environment variable holding the bearer token
    pub token_env: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            token_env: "PROBBOARD_TOKEN".to_string(),
        }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Show timestamps next to each comment
    pub show_timestamps: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "markdown".to_string(),
            show_timestamps: true,
        }
    }
}
