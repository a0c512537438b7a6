//! Core `adapters` crate for abstracting calls to the upstream identity provider.
//!
//! This crate defines the `IdentityProvider` trait, the one seam through which the
//! backend talks to the OAuth2/SSO server, and provides the concrete HTTP
//! implementation used in production.

pub mod errors;
pub mod http;
pub mod models;

pub use errors::AdapterError;
pub use http::HttpIdentityProvider;
pub use models::{UpstreamReply, UpstreamRequest};

use async_trait::async_trait;

/// Sends a single request to the upstream identity provider.
///
/// Implementations must not retry: one call here is one upstream round trip.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply, AdapterError>;
}
