//! Named log sinks.
//!
//! A [`Sink`] owns a minimum level and a list of [`Handler`]s. Sinks can be
//! created free-standing with [`Sink::new`] and injected where needed, or
//! shared process-wide by name through [`named`].

use std::collections::HashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use log::{Level, LevelFilter, debug};

use crate::error::{LoggerError, Result};
use crate::format::{Formatter, Record};

/// One output binding attached to a sink.
pub trait Handler: Send {
    fn emit(&mut self, record: &Record) -> io::Result<()>;

    /// Short human-readable description, used in diagnostics.
    fn describe(&self) -> String;
}

/// Appends formatted records to a file, one line each.
pub struct FileHandler {
    path: PathBuf,
    file: File,
    formatter: Formatter,
}

impl FileHandler {
    /// Open `path` for appending, creating the file if it does not exist.
    /// The parent directory must already exist.
    pub fn open(path: impl AsRef<Path>, formatter: Formatter) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file,
            formatter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn emit(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.file, "{}", self.formatter.format(record))?;
        self.file.flush()
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

pub struct Sink {
    name: String,
    level: RwLock<LevelFilter>,
    handlers: Mutex<Vec<Box<dyn Handler>>>,
}

impl Sink {
    /// A free-standing sink at `Info` level with no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LevelFilter::Info),
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn handler_count(&self) -> usize {
        self.lock_handlers().len()
    }

    /// Attach the handler built by `make` only if no handler is attached yet.
    ///
    /// The check and the attach happen under the same lock, so concurrent
    /// callers end up with exactly one handler. `make` is not called when a
    /// handler is already present. Returns whether a handler was attached.
    pub fn attach_if_absent<F>(&self, make: F) -> Result<bool>
    where
        F: FnOnce() -> Result<Box<dyn Handler>>,
    {
        let mut handlers = self.lock_handlers();
        if !handlers.is_empty() {
            debug!(
                "Sink '{}' already has {} handler(s), not attaching another",
                self.name,
                handlers.len()
            );
            return Ok(false);
        }

        let handler = make()?;
        debug!("Sink '{}': attached {}", self.name, handler.describe());
        handlers.push(handler);
        Ok(true)
    }

    /// Pass a message to every handler, unless it is below the sink level.
    pub fn emit(&self, level: Level, message: &str) -> Result<()> {
        if level > self.level() {
            return Ok(());
        }

        let record = Record::new(level, message);
        let mut handlers = self.lock_handlers();
        for handler in handlers.iter_mut() {
            handler.emit(&record).map_err(LoggerError::Write)?;
        }
        Ok(())
    }

    fn lock_handlers(&self) -> MutexGuard<'_, Vec<Box<dyn Handler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<Sink>>>> = OnceLock::new();

/// Get the process-wide sink called `name`, creating it on first use.
/// Sinks in the registry live until the process exits.
pub fn named(name: &str) -> Arc<Sink> {
    let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
    let mut sinks = registry.lock().unwrap_or_else(PoisonError::into_inner);

    sinks
        .entry(name.to_string())
        .or_insert_with(|| {
            debug!("Creating sink '{}'", name);
            Arc::new(Sink::new(name))
        })
        .clone()
}
