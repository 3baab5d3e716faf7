//! Conversation logic and trait definitions for MedAssist.
//!
//! This crate defines the "ports" (the settings store and the webhook
//! exchange) that the infrastructure layer implements, plus the pure parts:
//! reply normalization, the timeout race, and the conversation controller.
//! It depends only on `medassist-types` -- never on `medassist-infra` or any
//! HTTP/filesystem crate.

pub mod chat;
pub mod config;
pub mod exchange;
