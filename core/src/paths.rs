use std::path::PathBuf;

use crate::platform::AppPaths;

/// Places the config file under the user config directory, falling back to
/// the working directory when none is known.
#[derive(Default)]
pub struct DefaultPaths;

impl AppPaths for DefaultPaths {
    fn config_path(&self) -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("task_logger")
            .join("config.toml")
    }
}
