//! Chat turn and session identifier types.
//!
//! A conversation is an ordered list of [`ChatTurn`]s authored by either the
//! user or the assistant. The [`SessionId`] correlates every turn of one
//! running chat with the webhook backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single message in the conversation.
///
/// Turns are immutable once created. The only mutation the conversation
/// allows is removing a user turn whose exchange failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user-authored turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content.into())
    }

    /// Create an assistant-authored turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content.into())
    }

    fn new(role: TurnRole, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

/// Opaque per-process conversation identifier sent with every request.
///
/// Rendered as 32 lowercase hex characters with no dashes. A new one is
/// generated for every chat process; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
