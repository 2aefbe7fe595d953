//! Storage module
//!
//! Connection pooling and the request store backing deferred callback
//! payloads.

pub mod connection;
pub mod requests;

pub use connection::{DatabasePool, create_pool, run_migrations};
pub use requests::RequestStore;
