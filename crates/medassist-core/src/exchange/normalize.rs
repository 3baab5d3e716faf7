//! Reply normalization.
//!
//! Workflow backends return whatever shape the workflow author configured,
//! so the reply body is matched against an ordered list of extractors. The
//! first extractor that finds non-blank text wins; when none does the reply
//! is [`ExchangeError::EmptyResponse`].
//!
//! Only non-blank string values count as present. A field holding an empty
//! string, a number, an object or null is skipped and the next extractor is
//! tried.

use medassist_types::error::ExchangeError;
use serde_json::Value;
use tracing::{debug, warn};

type Extractor = fn(&Value) -> Option<&str>;

/// Extractors in priority order.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("string_body", string_body),
    ("first_element_response", first_element_response),
    ("response", response_field),
    ("output", output_field),
    ("text", text_field),
    ("message", message_field),
    ("result", result_field),
];

fn string_body(body: &Value) -> Option<&str> {
    body.as_str()
}

fn first_element_response(body: &Value) -> Option<&str> {
    body.as_array()?.first()?.get("response")?.as_str()
}

fn object_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.as_object()?.get(name)?.as_str()
}

fn response_field(body: &Value) -> Option<&str> {
    object_field(body, "response")
}

fn output_field(body: &Value) -> Option<&str> {
    object_field(body, "output")
}

fn text_field(body: &Value) -> Option<&str> {
    object_field(body, "text")
}

fn message_field(body: &Value) -> Option<&str> {
    object_field(body, "message")
}

fn result_field(body: &Value) -> Option<&str> {
    object_field(body, "result")
}

/// Convert a decoded reply body into the assistant text.
pub fn normalize_reply(body: &Value) -> Result<String, ExchangeError> {
    let matched = EXTRACTORS.iter().find_map(|(name, extract)| {
        extract(body)
            .filter(|text| !text.trim().is_empty())
            .map(|text| (*name, text))
    });

    match matched {
        Some((name, text)) => {
            debug!(extractor = name, "Normalized webhook reply");
            Ok(text.to_string())
        }
        None => {
            warn!(body = %body, "Webhook reply has no usable text");
            Err(ExchangeError::EmptyResponse)
        }
    }
}
