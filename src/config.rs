// Runtime configuration.
// API base URL, request timeout and storage location, with environment overrides.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, WeappError};
use crate::storage::{FileStore, Storage, file};

pub const API_BASE_ENV: &str = "BRP_API_BASE";
pub const STORAGE_DIR_ENV: &str = "BRP_STORAGE_DIR";
pub const TIMEOUT_ENV: &str = "BRP_TIMEOUT_SECS";

/// Fixed timeout applied to every network request: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL joined to relative request URLs. Empty means only absolute URLs work.
    pub api_base: String,
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// Directory of the on-disk store.
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            timeout: DEFAULT_TIMEOUT,
            storage_dir: file::default_dir(),
        }
    }
}

impl Config {
    /// Defaults overridden by `BRP_API_BASE`, `BRP_STORAGE_DIR` and `BRP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_ENV) {
            config.api_base = base;
        }
        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                WeappError::Other(format!("Invalid {}: {:?}", TIMEOUT_ENV, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Open file-backed storage in the configured directory.
    pub fn open_storage(&self) -> Result<Storage<FileStore>> {
        let dir = self
            .storage_dir
            .clone()
            .ok_or_else(|| WeappError::Other("No storage directory available".to_string()))?;
        Ok(Storage::new(FileStore::open(dir)?))
    }
}
