//! WebhookExchange -- concrete [`Exchange`] implementation over reqwest.
//!
//! Sends `{"sessionId", "action": "sendMessage", "chatInput"}` as a JSON POST
//! to the webhook URL, races the call against the configured timeout, and
//! maps the outcome onto [`ExchangeError`]. Error bodies are logged here and
//! never travel further than the error value.

use std::time::Duration;

use medassist_core::exchange::deadline::with_deadline;
use medassist_core::exchange::normalize::normalize_reply;
use medassist_core::exchange::transport::Exchange;
use medassist_types::error::ExchangeError;
use medassist_types::exchange::ExchangeRequest;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// HTTP client for the workflow webhook.
pub struct WebhookExchange {
    client: reqwest::Client,
    timeout: Duration,
}

impl WebhookExchange {
    /// Create a new webhook client with the given hard timeout.
    ///
    /// No client-level timeout is set on reqwest; the deadline is enforced
    /// per exchange by racing the request against a timer.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("medassist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn round_trip(&self, request: &ExchangeRequest) -> Result<String, ExchangeError> {
        let response = self
            .client
            .post(&request.endpoint)
            .json(&request.payload())
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Webhook responded with an error status");
            return Err(ExchangeError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(format!("failed to read response body: {e}")))?;

        let reply: Value = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %body, "Webhook reply is not valid JSON");
            ExchangeError::Decode(e.to_string())
        })?;
        debug!(reply = %reply, "Webhook reply received");

        normalize_reply(&reply)
    }
}

impl Exchange for WebhookExchange {
    async fn send(&self, request: &ExchangeRequest) -> Result<String, ExchangeError> {
        info!(
            session_id = %request.session_id,
            input_len = request.chat_input.len(),
            "Sending message to webhook"
        );
        with_deadline(self.timeout, self.round_trip(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use medassist_types::chat::SessionId;
    use medassist_types::exchange::SEND_MESSAGE_ACTION;
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return the webhook URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/webhook")
    }

    fn request_to(endpoint: &str, text: &str) -> ExchangeRequest {
        ExchangeRequest {
            session_id: SessionId::generate(),
            chat_input: text.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    fn exchange() -> WebhookExchange {
        WebhookExchange::new(Duration::from_secs(10)).unwrap()
    }

    async fn reply_with(body: Value) -> Result<String, ExchangeError> {
        let url = spawn_backend(Router::new().route(
            "/webhook",
            post(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        ))
        .await;
        exchange().send(&request_to(&url, "hello")).await
    }

    #[tokio::test]
    async fn test_posts_json_payload() {
        let seen: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let url = spawn_backend(Router::new().route(
            "/webhook",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some((headers, body));
                    Json(json!({"response": "Possible conditions: flu, bronchitis..."}))
                }
            }),
        ))
        .await;

        let request = request_to(&url, "I have a fever, cough, and chest pains");
        let reply = exchange().send(&request).await.unwrap();
        assert_eq!(reply, "Possible conditions: flu, bronchitis...");

        let (headers, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(body["sessionId"], request.session_id.as_str());
        assert_eq!(body["action"], SEND_MESSAGE_ACTION);
        assert_eq!(body["chatInput"], "I have a fever, cough, and chest pains");
    }

    #[tokio::test]
    async fn test_reply_shapes_are_normalized() {
        assert_eq!(reply_with(json!([{"response": "A"}])).await.unwrap(), "A");
        assert_eq!(reply_with(json!({"output": "B"})).await.unwrap(), "B");
        assert_eq!(reply_with(json!("plain")).await.unwrap(), "plain");
    }

    #[tokio::test]
    async fn test_empty_object_is_empty_response() {
        assert!(matches!(
            reply_with(json!({})).await,
            Err(ExchangeError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let url = spawn_backend(Router::new().route(
            "/webhook",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        ))
        .await;

        let err = exchange().send(&request_to(&url, "hello")).await.unwrap_err();
        match err {
            ExchangeError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_http_error() {
        let url = spawn_backend(Router::new().route("/other", post(|| async { "x" }))).await;
        let err = exchange().send(&request_to(&url, "hello")).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_non_json_success_is_decode_error() {
        let url = spawn_backend(Router::new().route(
            "/webhook",
            post(|| async { "Workflow was started" }),
        ))
        .await;

        let err = exchange().send(&request_to(&url, "hello")).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let url = spawn_backend(Router::new().route(
            "/webhook",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(json!({"response": "too late"}))
            }),
        ))
        .await;

        let exchange = WebhookExchange::new(Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();
        let err = exchange.send(&request_to(&url, "hello")).await.unwrap_err();

        assert!(matches!(err, ExchangeError::Timeout));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = exchange()
            .send(&request_to(&format!("http://{addr}/webhook"), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Network(_)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_network_error() {
        let err = exchange()
            .send(&request_to("not a url", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Network(_)));
    }
}
