//! Exchange trait definition.
//!
//! Implementations live in medassist-infra (e.g., `WebhookExchange`).

use medassist_types::error::ExchangeError;
use medassist_types::exchange::ExchangeRequest;

/// One request/response round trip with the chat backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait Exchange: Send + Sync {
    /// Send one user message and return the normalized reply text.
    ///
    /// Implementations enforce the timeout themselves and report a reply
    /// with no usable text as [`ExchangeError::EmptyResponse`].
    fn send(
        &self,
        request: &ExchangeRequest,
    ) -> impl std::future::Future<Output = Result<String, ExchangeError>> + Send;
}
