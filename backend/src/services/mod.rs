//! Module for core business logic services.
//!
//! The only service here is the relay that forwards browser calls to the
//! upstream identity provider.

pub mod relay;

pub use relay::{json_body, Relay, Relayed};
