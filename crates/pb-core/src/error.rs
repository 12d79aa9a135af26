//! Error types for probboard

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for probboard
#[derive(Debug, Error)]
pub enum ProbboardError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A reload response arrived after a newer one was requested
    #[error("Stale reload for problem {problem}: generation {generation} superseded by {latest}")]
    StaleReload {
        problem: String,
        generation: u64,
        latest: u64,
    },
}

impl From<toml::de::Error> for ProbboardError {
    fn from(err: toml::de::Error) -> Self {
        ProbboardError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ProbboardError {
    fn from(err: toml::ser::Error) -> Self {
        ProbboardError::Toml(err.to_string())
    }
}

/// Result type alias for probboard
pub type Result<T> = std::result::Result<T, ProbboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProbboardError::Validation("comment text is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: comment text is empty");
    }

    #[test]
    fn test_stale_reload_display() {
        let err = ProbboardError::StaleReload {
            problem: "7".to_string(),
            generation: 1,
            latest: 3,
        };
        assert_eq!(
            err.to_string(),
            "Stale reload for problem 7: generation 1 superseded by 3"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ProbboardError = toml_err.into();
        assert!(matches!(err, ProbboardError::Toml(_)));
    }
}
