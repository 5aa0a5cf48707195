//! File-and-console logging for the task scheduler.
//!
//! A [`Logger`] appends each message to a log file through a shared, named
//! [`Sink`] and echoes it to stdout, optionally wrapped in an ANSI color.

pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod logger;
pub mod paths;
pub mod sink;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use logger::Logger;
pub use sink::Sink;

/// Interfaces that host applications can implement to adapt the library
/// to their environment.
pub mod platform {
    /// Trait for platform-correct config paths.
    pub trait AppPaths {
        fn config_path(&self) -> std::path::PathBuf;
    }
}
