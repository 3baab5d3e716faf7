//! Settings store trait.
//!
//! Defines the interface for durable client-side key-value settings.
//! The file-backed implementation lives in medassist-infra.

use dashmap::DashMap;
use medassist_types::error::StoreError;

/// Trait for persisted string settings keyed by a fixed name.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait ConfigStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// In-process settings store.
///
/// Nothing written here outlives the process. Used for one-off endpoint
/// overrides and as the test double for the durable store.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: DashMap<String, String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.get("n8n_webhook_url").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_overwrites() {
        let store = MemoryConfigStore::with_entry("k", "first");
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }
}
