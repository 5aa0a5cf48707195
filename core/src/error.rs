//! Error type shared by every fallible operation in the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log file could not be opened for appending.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log record: {0}")]
    Write(#[source] io::Error),

    #[error("failed to write to console: {0}")]
    Console(#[source] io::Error),

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
}

pub type Result<T> = std::result::Result<T, LoggerError>;
