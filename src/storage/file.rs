// Disk-backed key-value store.
// Keeps one file per key under a directory; writes go through a unique temp file and rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use super::backend::{KeyValueStore, Result, StorageError};

const ENTRY_EXTENSION: &str = "entry";

/// Default storage directory (~/.local/share/brp-weapp on Linux).
pub fn default_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "brp-weapp").map(|dirs| dirs.data_dir().join("storage"))
}

/// Key-value store persisting each entry as a file in `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", encode_key(key), ENTRY_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, data: String) -> Result<()> {
        let dir = self.dir.clone();
        let path = self.entry_path(key);

        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, data.as_bytes()))
            .await
            .map_err(|e| StorageError::Backend(format!("write task failed: {}", e)))?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `data` to `path` through a temp file of its own in `dir`, so
/// concurrent writers to one key never share a partially written file.
fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Encode a key into a file name.
/// Anything outside `[A-Za-z0-9_-]` is percent-escaped so distinct keys never share a file.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
