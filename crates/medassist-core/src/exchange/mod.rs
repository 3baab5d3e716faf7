//! Webhook exchange abstractions.
//!
//! The `Exchange` trait is the single request/response seam; `normalize`
//! turns heterogeneous reply bodies into text; `deadline` races a request
//! against the hard timeout.

pub mod deadline;
pub mod normalize;
pub mod transport;
