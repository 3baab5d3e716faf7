//! Hard timeout for an in-flight exchange.

use std::future::Future;
use std::time::Duration;

use medassist_types::error::ExchangeError;
use tracing::warn;

/// Bound `request` by `limit`.
///
/// On expiry the request future is dropped, which aborts the underlying
/// HTTP call. A request that is ready at the same instant still wins.
pub async fn with_deadline<F, T>(limit: Duration, request: F) -> Result<T, ExchangeError>
where
    F: Future<Output = Result<T, ExchangeError>>,
{
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Exchange timed out, cancelling request");
            Err(ExchangeError::Timeout)
        }
    }
}
