//! Webhook exchange request and wire payload types.

use serde::Serialize;

use crate::chat::SessionId;

/// Value of the `action` field on every outbound payload.
pub const SEND_MESSAGE_ACTION: &str = "sendMessage";

/// Assistant text substituted when the reply has no usable content.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't process your request. The response format was unexpected.";

/// Everything needed to perform one exchange with the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub session_id: SessionId,
    pub chat_input: String,
    pub endpoint: String,
}

impl ExchangeRequest {
    /// Build the JSON body sent to the webhook.
    pub fn payload(&self) -> WebhookPayload<'_> {
        WebhookPayload {
            session_id: self.session_id.as_str(),
            action: SEND_MESSAGE_ACTION,
            chat_input: &self.chat_input,
        }
    }
}

/// JSON body of the outbound POST.
///
/// Serializes as `{"sessionId": ..., "action": "sendMessage", "chatInput": ...}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload<'a> {
    pub session_id: &'a str,
    pub action: &'a str,
    pub chat_input: &'a str,
}
