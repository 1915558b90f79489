//! Core Service Layer
//!
//! Shared infrastructure for the relay: authenticated request context,
//! session lookup, error handling, and routing.

pub mod ctx;
pub mod error;
pub mod middleware;
pub mod router;
pub mod session;

// Re-exports for convenience
pub use ctx::Ctx;
pub use error::{Error, Result};
pub use router::router;
