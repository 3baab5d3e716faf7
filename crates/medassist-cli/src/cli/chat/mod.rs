//! Interactive terminal chat for MedAssist.
//!
//! Welcome banner, webhook settings prompt, slash commands, a spinner while
//! the workflow answers, and Markdown rendering of replies. Entry point:
//! `loop_runner::run_chat`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod settings;
