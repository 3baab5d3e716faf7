//! Webhook exchange over HTTP.
//!
//! `WebhookExchange` POSTs the chat payload to the configured workflow
//! webhook and normalizes whatever JSON comes back.

pub mod client;

pub use client::WebhookExchange;
