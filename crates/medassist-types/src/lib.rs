//! Shared domain types for MedAssist.
//!
//! Chat turns, the webhook wire payload, client configuration, user-facing
//! notifications, and the error enums shared by every other crate.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod exchange;
pub mod notification;
