//! Webhook endpoint settings.
//!
//! Holds the configured webhook URL in memory and writes changes through to
//! the durable [`ConfigStore`]. The URL must be present and non-blank before
//! any exchange is attempted; no network validation is done here, so a bad
//! URL only surfaces when a message is sent.

use medassist_types::error::{ConfigError, StoreError};
use tracing::{debug, info};

use super::store::ConfigStore;

/// Fixed storage key for the webhook URL.
pub const ENDPOINT_KEY: &str = "n8n_webhook_url";

/// The webhook URL, cached in memory and persisted through `S`.
pub struct EndpointSettings<S: ConfigStore> {
    store: S,
    url: Option<String>,
}

impl<S: ConfigStore> EndpointSettings<S> {
    /// Read the persisted URL (if any) from the store.
    ///
    /// A stored blank value is treated as absent.
    pub async fn load(store: S) -> Result<Self, StoreError> {
        let url = store
            .get(ENDPOINT_KEY)
            .await?
            .filter(|url| !url.trim().is_empty());
        debug!(configured = url.is_some(), "Loaded endpoint settings");
        Ok(Self { store, url })
    }

    /// The configured webhook URL, if any.
    pub fn get(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Validate, persist, and cache a new webhook URL.
    ///
    /// The URL is trimmed before saving. Fails with [`ConfigError::EmptyUrl`]
    /// for empty or whitespace-only input, leaving the previous value intact.
    pub async fn set(&mut self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }

        self.store.set(ENDPOINT_KEY, url).await?;
        self.url = Some(url.to_string());
        info!("Webhook URL saved");
        Ok(())
    }
}
