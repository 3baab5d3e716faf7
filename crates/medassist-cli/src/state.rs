//! Application state shared by all commands.
//!
//! Holds the resolved data directory and client configuration, and builds
//! the concrete settings store and webhook client from them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use medassist_core::config::endpoint::EndpointSettings;
use medassist_core::config::store::MemoryConfigStore;
use medassist_infra::config::load_client_config;
use medassist_infra::filesystem::{resolve_data_dir, settings_path};
use medassist_infra::settings::FileConfigStore;
use medassist_infra::webhook::WebhookExchange;
use medassist_types::config::ClientConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub client_config: ClientConfig,
}

impl AppState {
    /// Resolve the data directory and load `config.toml`.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let client_config = load_client_config(&data_dir).await;
        Ok(Self {
            data_dir,
            client_config,
        })
    }

    pub fn settings_store(&self) -> FileConfigStore {
        FileConfigStore::new(settings_path(&self.data_dir))
    }

    /// Endpoint settings backed by the persisted settings file.
    pub async fn endpoint_settings(&self) -> anyhow::Result<EndpointSettings<FileConfigStore>> {
        EndpointSettings::load(self.settings_store())
            .await
            .context("failed to read saved settings")
    }

    /// Webhook client using the configured timeout.
    pub fn exchange(&self) -> anyhow::Result<Arc<WebhookExchange>> {
        let exchange = WebhookExchange::new(self.client_config.request_timeout())
            .context("failed to create HTTP client")?;
        Ok(Arc::new(exchange))
    }
}

/// Endpoint settings for a one-off `--url` override. Never persisted.
pub async fn override_settings(url: &str) -> anyhow::Result<EndpointSettings<MemoryConfigStore>> {
    let mut settings = EndpointSettings::load(MemoryConfigStore::new()).await?;
    settings
        .set(url)
        .await
        .context("invalid --url value")?;
    Ok(settings)
}
