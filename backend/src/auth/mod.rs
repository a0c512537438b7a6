//! Authentication module: the session gate and the relays that own the
//! session cookies.
//!
//! Tokens are issued and checked by the upstream identity provider; this module
//! only stores them in cookies, reads them back, and decides which pages a
//! browser may reach.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::{session_gate, SessionGate};
pub use models::*;
pub use routes::*;
