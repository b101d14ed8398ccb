use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides the platform data directory when set.
pub(crate) const DATA_DIR_ENV: &str = "POCKETBUDGET_DATA_DIR";

const DB_FILE: &str = "pocketbudget.db";
const LOG_FILE: &str = "pocketbudget.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Config {
    /// Resolve paths from the environment, falling back to the platform
    /// data directory, and make sure the directory exists.
    pub(crate) fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        Self::in_dir(&data_dir)
    }

    pub(crate) fn in_dir(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            db_path: data_dir.join(DB_FILE),
            log_path: data_dir.join(LOG_FILE),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pocketbudget", "PocketBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
