//! User-facing notifications.
//!
//! A notification is the dismissible message shown when an exchange fails
//! or configuration is missing. It never carries raw transport details such
//! as response bodies; those go to the log.

use serde::Serialize;

use crate::error::{ConfigError, ExchangeError};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ConfigRequired,
    InvalidConfig,
    Timeout,
    Http,
    Network,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// Shown when a message is submitted before any webhook is configured.
    pub fn config_required() -> Self {
        Self::new(
            NotificationKind::ConfigRequired,
            "Configuration Required",
            "Please configure your n8n webhook URL in settings first.",
        )
    }

    /// Notification for a failed exchange.
    ///
    /// Returns `None` for [`ExchangeError::EmptyResponse`], which is not
    /// surfaced as an error at all.
    pub fn for_exchange_error(err: &ExchangeError) -> Option<Self> {
        let notification = match err {
            ExchangeError::Timeout => Self::new(
                NotificationKind::Timeout,
                "Request Timed Out",
                "The assistant did not respond in time. Please try again.",
            ),
            ExchangeError::Http { status, .. } => Self::new(
                NotificationKind::Http,
                "Server Error",
                format!("Failed to send message. Server responded with status {status}."),
            ),
            ExchangeError::Network(_) => Self::new(
                NotificationKind::Network,
                "Connection Error",
                "Failed to send message. Check if your n8n webhook URL is correct and your workflow is active.",
            ),
            ExchangeError::Decode(_) => Self::new(
                NotificationKind::Decode,
                "Unexpected Response",
                "Failed to send message. The webhook reply was not valid JSON.",
            ),
            ExchangeError::EmptyResponse => return None,
        };
        Some(notification)
    }

    /// Notification for a rejected or unsaved configuration.
    pub fn for_config_error(err: &ConfigError) -> Self {
        match err {
            ConfigError::EmptyUrl => Self::new(
                NotificationKind::InvalidConfig,
                "Error",
                "Please enter a valid webhook URL",
            ),
            ConfigError::Store(_) => Self::new(
                NotificationKind::InvalidConfig,
                "Error",
                "The webhook URL could not be saved.",
            ),
        }
    }
}
