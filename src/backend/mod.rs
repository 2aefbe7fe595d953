//! Registration gateway transport
//!
//! The facades in `crate::facades` are thin domain wrappers over this client.

pub mod client;

pub use client::{BackendClient, ErrorEnvelope};
