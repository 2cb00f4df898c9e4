//! Error types shared across grouping crates.

use std::path::PathBuf;

/// Top-level error type for grouping operations.
#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
    #[error("Non-finite key {value} at input index {index}")]
    NonFiniteKey { index: usize, value: f64 },

    #[error("Invalid tolerance: {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GroupingError.
pub type GroupingResult<T> = Result<T, GroupingError>;

impl GroupingError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_key_message_names_index() {
        let err = GroupingError::NonFiniteKey {
            index: 3,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Non-finite key NaN at input index 3");
    }

    #[test]
    fn helpers_build_message_variants() {
        let err = GroupingError::input("bad token 'x'");
        assert_eq!(err.to_string(), "Input error: bad token 'x'");
        let err = GroupingError::config("tolerance must not be NaN");
        assert_eq!(
            err.to_string(),
            "Configuration error: tolerance must not be NaN"
        );
    }
}
