//! File-backed key-value store
//!
//! All keys live in one JSON object file. Writes go to a sibling temp file
//! that is renamed over the original, so a crash never leaves a truncated
//! store behind. On Unix the file is readable by its owner only.

use crate::{Error, KeyValueStore, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Name of the store file inside the data directory
pub const STORE_FILE_NAME: &str = "storage.json";

/// Per-user data directory for this installation
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "fingerpay")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(Error::NoDataDir)
}

/// JSON file store
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store file inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORE_FILE_NAME))
    }

    /// Store in the default per-user data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::in_dir(default_data_dir()?))
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(Error::Corrupt(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(Error::Corrupt(format!("{}: {}", self.path.display(), e))),
        }
    }

    async fn save(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(map)
            .map_err(|e| Error::Corrupt(format!("Failed to serialize store: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Wrote {} keys to {}", map.len(), self.path.display());
        Ok(())
    }
}

/// Write `data` to `path`, which is owner-only before any byte lands.
async fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    // A temp file left over from a crash keeps its old mode.
    restrict_permissions(&file).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(unix)]
async fn restrict_permissions(file: &tokio::fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_file: &tokio::fs::File) -> Result<()> {
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load().await?;
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::Corrupt(format!("value for '{}' is not a string", key))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.save(&map).await?;
        }
        Ok(())
    }
}
