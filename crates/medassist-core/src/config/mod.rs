//! Endpoint configuration.
//!
//! `ConfigStore` is the durable key-value seam; `EndpointSettings` layers the
//! webhook URL rules on top of it.

pub mod endpoint;
pub mod store;
