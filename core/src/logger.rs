//! The task logger: every message is appended to the sink's log file and
//! echoed to the console, optionally in color.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use log::{Level, debug};

use crate::config::LoggerConfig;
use crate::console;
use crate::error::{LoggerError, Result};
use crate::sink::{self, FileHandler, Handler, Sink};

/// Cheap handle onto a shared [`Sink`]. Clone or construct as many as
/// needed; the sink gets at most one file handler however many exist.
#[derive(Clone, Debug)]
pub struct Logger {
    sink: Arc<Sink>,
}

impl Logger {
    /// Logger on the shared `TaskSchedulerLogger` sink, writing to
    /// `system.log` in the working directory.
    pub fn new() -> Result<Self> {
        Self::from_config(&LoggerConfig::default())
    }

    /// Same as [`Logger::new`] with a different log file. The path only
    /// matters for the first logger attached to the shared sink.
    pub fn with_file(log_file: impl Into<PathBuf>) -> Result<Self> {
        Self::from_config(&LoggerConfig::with_file(log_file))
    }

    /// Logger on the process-wide sink named by `config.sink_name`.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Self::with_sink(sink::named(&config.sink_name), config)
    }

    /// Logger on an explicitly provided sink.
    ///
    /// Attaches a file handler for `config.log_file` unless the sink already
    /// has a handler, then sets the sink level from the config. A failed open
    /// leaves the sink as it was.
    pub fn with_sink(sink: Arc<Sink>, config: &LoggerConfig) -> Result<Self> {
        let level = config.level_filter()?;
        let formatter = config.formatter()?;

        let attached = sink.attach_if_absent(|| {
            let handler: Box<dyn Handler> =
                Box::new(FileHandler::open(&config.log_file, formatter)?);
            Ok(handler)
        })?;

        if !attached {
            debug!(
                "Reusing handler of sink '{}', ignoring {:?}",
                sink.name(),
                config.log_file
            );
        }

        sink.set_level(level);

        Ok(Self { sink })
    }

    pub fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    /// Append `message` to the log file and print it to stdout.
    ///
    /// `color` is a raw escape prefix such as [`console::RED`]. When it is
    /// present and non-empty the console line is wrapped in it and a reset
    /// code; the file line never carries it.
    pub fn log(&self, message: &str, color: Option<&str>) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.log_to(&mut out, message, color)
    }

    /// Same as [`Logger::log`] with the console output sent to `out`.
    pub fn log_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        message: &str,
        color: Option<&str>,
    ) -> Result<()> {
        self.sink.emit(Level::Info, message)?;
        console::write_line(out, message, color).map_err(LoggerError::Console)
    }
}
