//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{GroupingError, GroupingResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Default grouping settings.
    pub grouping: GroupingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default grouping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingDefaults {
    /// Maximum distance between a value and a cluster's running mean.
    pub tolerance: f64,

    /// Field delimiter used when grouping delimited records.
    pub delimiter: char,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "grouping_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Whether to log to stderr.
    pub stderr: bool,

    /// Optional log file path. Rotated files share its name as a prefix.
    pub file: Option<PathBuf>,

    /// How often the log file is rotated.
    pub rotation: LogRotation,

    /// Number of rotated log files to keep.
    pub max_files: usize,
}

/// Log file rotation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl Default for GroupingDefaults {
    fn default() -> Self {
        Self {
            tolerance: 20.0,
            delimiter: ',',
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            stderr: true,
            file: None,
            rotation: LogRotation::Daily,
            max_files: 4,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::from_json(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> GroupingResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the grouper cannot work with.
    pub fn validate(&self) -> GroupingResult<()> {
        if self.grouping.tolerance.is_nan() {
            return Err(GroupingError::config("grouping.tolerance must not be NaN"));
        }
        if self.logging.file.is_some() && self.logging.max_files == 0 {
            return Err(GroupingError::config("logging.max_files must be at least 1"));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> GroupingResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> GroupingResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("grouping").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let config = AppConfig::from_json(r#"{ "grouping": { "tolerance": 2.5 } }"#).unwrap();
        assert_eq!(config.grouping.tolerance, 2.5);
        assert_eq!(config.grouping.delimiter, ',');
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn logging_file_settings_parse() {
        let config = AppConfig::from_json(
            r#"{ "logging": { "file": "/var/log/grouping.log", "rotation": "hourly", "max_files": 2, "stderr": false } }"#,
        )
        .unwrap();
        assert_eq!(
            config.logging.file.as_deref(),
            Some(std::path::Path::new("/var/log/grouping.log"))
        );
        assert_eq!(config.logging.rotation, LogRotation::Hourly);
        assert_eq!(config.logging.max_files, 2);
        assert!(!config.logging.stderr);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn zero_kept_log_files_is_rejected() {
        let err = AppConfig::from_json(r#"{ "logging": { "file": "g.log", "max_files": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, GroupingError::Config { .. }));
    }

    #[test]
    fn default_tolerance_is_twenty() {
        assert_eq!(AppConfig::default().grouping.tolerance, 20.0);
    }

    #[test]
    fn round_trips_through_file() {
        let path = std::env::temp_dir()
            .join(format!("grouping-config-{}", std::process::id()))
            .join("config.json");
        let mut config = AppConfig::default();
        config.grouping.tolerance = 0.75;
        config.logging.json = true;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("grouping-bad-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("grouping-definitely-missing/config.json");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }
}
