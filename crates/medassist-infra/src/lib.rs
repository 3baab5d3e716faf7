//! Infrastructure layer for MedAssist.
//!
//! Contains implementations of the traits defined in `medassist-core`:
//! the reqwest-backed webhook exchange and the TOML settings file, plus the
//! client config loader and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod settings;
pub mod webhook;
