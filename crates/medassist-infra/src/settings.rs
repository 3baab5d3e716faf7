//! File-backed settings store.
//!
//! Persists string settings as a flat TOML table, e.g.
//!
//! ```toml
//! n8n_webhook_url = "https://n8n.example.com/webhook/abc"
//! ```
//!
//! The file is read on each call; callers such as `EndpointSettings` cache
//! the value they load. A file that does not parse is treated as empty so
//! the user can always save a new URL over it.

use std::path::{Path, PathBuf};

use medassist_core::config::store::ConfigStore;
use medassist_types::error::StoreError;
use tracing::{debug, warn};

pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self) -> Result<toml::Table, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content.parse::<toml::Table>().map_err(|e| {
                StoreError::Malformed(format!("{}: {e}", self.path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(err) => Err(io_error(&self.path, err)),
        }
    }

    /// Like `read_table`, but an unparsable file yields an empty table.
    async fn read_table_or_empty(&self) -> Result<toml::Table, StoreError> {
        match self.read_table().await {
            Err(StoreError::Malformed(reason)) => {
                warn!(%reason, "Settings file is malformed, ignoring its contents");
                Ok(toml::Table::new())
            }
            other => other,
        }
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {err}", path.display()))
}

impl ConfigStore for FileConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let table = self.read_table_or_empty().await?;
        Ok(table.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut table = self.read_table_or_empty().await?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        let content =
            toml::to_string(&table).map_err(|e| StoreError::Malformed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        // Write then rename so an interrupted write never truncates the file.
        let staging = self.path.with_extension("toml.tmp");
        tokio::fs::write(&staging, content)
            .await
            .map_err(|e| io_error(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(key, path = %self.path.display(), "Setting persisted");
        Ok(())
    }
}
