//! Logger configuration.
//! Uses injected `AppPaths` so callers control where the config file lives.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use log::{LevelFilter, debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LoggerError, Result};
use crate::format::{DEFAULT_TEMPLATE, DEFAULT_TIMESTAMP_FORMAT, Formatter};
use crate::platform::AppPaths;

/// Name of the sink shared by every `Logger` built from the defaults.
pub const DEFAULT_SINK_NAME: &str = "TaskSchedulerLogger";

pub const DEFAULT_LOG_FILE: &str = "system.log";

/// Settings for a `Logger`. Read from the `[logger]` table of the config
/// file; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub sink_name: String,
    /// Relative paths resolve against the process working directory.
    pub log_file: PathBuf,
    pub level: String,
    pub format: String,
    pub timestamp_format: String,
}

impl LoggerConfig {
    /// Defaults with a different log file.
    pub fn with_file(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the provided paths. A missing file yields
    /// the defaults.
    pub fn load_with(paths: &dyn AppPaths) -> Result<Self> {
        let config_path = paths.config_path();

        if !config_path.exists() {
            info!(
                "Config file not found at {:?}, using default logger settings",
                config_path
            );
            return Ok(Self::default());
        }

        debug!("Loading logger config from {:?}", config_path);
        let content =
            fs::read_to_string(&config_path).map_err(|source| LoggerError::ConfigRead {
                path: config_path.clone(),
                source,
            })?;

        let config = Self::from_toml_str(&content)?;
        info!(
            "Loaded logger config: sink '{}' writing to {:?}",
            config.sink_name, config.log_file
        );
        Ok(config)
    }

    /// Parse the `[logger]` table out of a TOML document. Other tables are
    /// ignored so the logger can share a config file with its host.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: toml::Table = content.parse()?;

        let config: Self = match document.get("logger") {
            Some(table) => table.clone().try_into()?,
            None => Self::default(),
        };

        // Surface bad values at load time rather than on first use
        config.level_filter()?;
        config.formatter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| LoggerError::InvalidLevel(self.level.clone()))
    }

    pub fn formatter(&self) -> Result<Formatter> {
        Formatter::new(&self.format, &self.timestamp_format)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            sink_name: DEFAULT_SINK_NAME.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            level: "info".to_string(),
            format: DEFAULT_TEMPLATE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct TestPaths(PathBuf);

    impl AppPaths for TestPaths {
        fn config_path(&self) -> PathBuf {
            self.0.clone()
        }
    }

    #[test]
    fn defaults_match_task_scheduler_logger() {
        let config = LoggerConfig::default();
        assert_eq!(config.sink_name, "TaskSchedulerLogger");
        assert_eq!(config.log_file, Path::new("system.log"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.formatter().unwrap().template(), "{timestamp} - {message}");
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = LoggerConfig::from_toml_str(
            r#"
            [logger]
            log_file = "/var/log/tasks.log"
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_file, Path::new("/var/log/tasks.log"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.sink_name, DEFAULT_SINK_NAME);
        assert_eq!(config.format, DEFAULT_TEMPLATE);
    }

    #[test]
    fn document_without_logger_table_uses_defaults() {
        let config = LoggerConfig::from_toml_str("[tunnels]\nfoo = 1\n").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = LoggerConfig::from_toml_str("[logger]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(level) if level == "loud"));
    }

    #[test]
    fn unrenderable_timestamp_format_is_rejected() {
        let err =
            LoggerConfig::from_toml_str("[logger]\ntimestamp_format = \"%#z\"\n").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTimestampFormat(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LoggerConfig::from_toml_str("[logger\n").unwrap_err();
        assert!(matches!(err, LoggerError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = TestPaths(dir.path().join("config.toml"));
        assert_eq!(LoggerConfig::load_with(&paths).unwrap(), LoggerConfig::default());
    }

    #[test]
    fn loads_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logger]\nsink_name = \"Backups\"\n").unwrap();

        let config = LoggerConfig::load_with(&TestPaths(path)).unwrap();
        assert_eq!(config.sink_name, "Backups");
        assert_eq!(config.log_file, Path::new(DEFAULT_LOG_FILE));
    }
}
