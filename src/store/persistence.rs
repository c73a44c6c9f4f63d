//! Store persistence: load/save with atomic writes

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Store schema version for rejecting files written by an incompatible build
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Small string key/value store persisted as a JSON document
///
/// Every [`put`](KvStore::put) rewrites the whole file through a temp file and
/// rename, so readers never observe a half-written store.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`, starting empty if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// was written with a different [`STORE_VERSION`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self { path: path.to_path_buf(), entries: BTreeMap::new() });
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;
        let file: StoreFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse store file: {}", path.display()))?;

        if file.version != STORE_VERSION {
            bail!(
                "Store version mismatch in {} (expected {}, found {})",
                path.display(),
                STORE_VERSION,
                file.version
            );
        }

        Ok(Self { path: path.to_path_buf(), entries: file.entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key` and persist the store immediately
    pub fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let file = StoreFile { version: STORE_VERSION, entries: self.entries.clone() };
        let json = serde_json::to_string_pretty(&file).context("Failed to serialize store")?;

        // Write atomically (temp file + rename)
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);
        fs::write(&temp, json).context("Failed to write store temp file")?;
        fs::rename(&temp, &self.path).context("Failed to rename store temp file")?;

        Ok(())
    }
}
