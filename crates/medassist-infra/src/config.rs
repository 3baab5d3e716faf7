//! Client configuration loader for MedAssist.
//!
//! Reads `config.toml` from the data directory (`~/.medassist/` in production)
//! and deserializes it into [`ClientConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::Path;

use medassist_types::config::ClientConfig;

use crate::filesystem::config_path;

/// Shortest accepted request timeout (safety floor).
const MIN_REQUEST_TIMEOUT_MS: u64 = 1_000;

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - A request timeout below one second is raised to one second.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    let mut config = match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return ClientConfig::default();
        }
    };

    config.request_timeout_ms = config.request_timeout_ms.max(MIN_REQUEST_TIMEOUT_MS);
    config
}
