use thiserror::Error;

/// Errors from the durable settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings I/O error: {0}")]
    Io(String),

    #[error("malformed settings file: {0}")]
    Malformed(String),
}

/// Errors related to endpoint configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The webhook URL was empty or whitespace-only.
    #[error("webhook URL must not be empty")]
    EmptyUrl,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of a single webhook exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No response arrived before the deadline; the request was cancelled.
    #[error("webhook did not respond before the timeout")]
    Timeout,

    /// The webhook answered with a non-success status.
    ///
    /// `body` is diagnostic text for logs only.
    #[error("webhook responded with status {status}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, connect, invalid URL).
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body was not valid JSON.
    #[error("could not decode webhook reply: {0}")]
    Decode(String),

    /// The reply carried no usable text in any known field.
    #[error("webhook reply contained no usable text")]
    EmptyResponse,
}
