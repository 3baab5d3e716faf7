//! Conversation state and the controller that drives exchanges.

pub mod controller;
pub mod conversation;
