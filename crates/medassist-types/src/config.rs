//! Client configuration types for MedAssist.
//!
//! `ClientConfig` represents the optional `config.toml` in the data
//! directory that tunes the request timeout and terminal presentation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default hard timeout for one webhook exchange (2 minutes).
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// Top-level client configuration.
///
/// Loaded from `~/.medassist/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Hard timeout for one webhook exchange, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Label shown on assistant turns.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Print the medical disclaimer in the welcome banner.
    #[serde(default = "default_show_disclaimer")]
    pub show_disclaimer: bool,
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_assistant_name() -> String {
    "MedAssist".to_string()
}

fn default_show_disclaimer() -> bool {
    true
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            assistant_name: default_assistant_name(),
            show_disclaimer: default_show_disclaimer(),
        }
    }
}
