//! HTTP adapter for the upstream identity provider.
//!
//! This file contains the reqwest-backed implementation of `IdentityProvider`:
//! URL construction against the configured base, bearer attachment, and decoding
//! of the upstream body into JSON.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::errors::AdapterError;
use crate::models::{UpstreamReply, UpstreamRequest};
use crate::IdentityProvider;

#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
}

impl HttpIdentityProvider {
    /// Creates an adapter with no request timeout beyond the transport's own.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdapterError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AdapterError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AdapterError::Client)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &UpstreamRequest) -> String {
        match &request.query {
            Some(query) => format!("{}{}?{}", self.base_url, request.path, query),
            None => format!("{}{}", self.base_url, request.path),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply, AdapterError> {
        let url = self.url(&request);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!("{} {} failed: {}", request.method, request.path, err);
            AdapterError::Transport(err)
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(AdapterError::Transport)?;
        debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status,
            bytes.len()
        );

        Ok(UpstreamReply {
            status,
            body: decode_body(&bytes)?,
        })
    }
}

/// Empty or whitespace-only bodies decode to `None`.
fn decode_body(bytes: &[u8]) -> Result<Option<Value>, AdapterError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(AdapterError::MalformedBody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let adapter = HttpIdentityProvider::new("http://idp.local/api/").unwrap();
        assert_eq!(adapter.base_url(), "http://idp.local/api");

        let request = UpstreamRequest::get("/admin/users");
        assert_eq!(adapter.url(&request), "http://idp.local/api/admin/users");
    }

    #[test]
    fn query_is_appended() {
        let adapter = HttpIdentityProvider::new("http://idp.local").unwrap();
        let request = UpstreamRequest::get("/admin/users").with_query(Some("page=2".into()));
        assert_eq!(adapter.url(&request), "http://idp.local/admin/users?page=2");

        let request = UpstreamRequest::get("/admin/users").with_query(Some(String::new()));
        assert_eq!(adapter.url(&request), "http://idp.local/admin/users");
    }

    #[test]
    fn decode_empty_and_json_bodies() {
        assert_eq!(decode_body(b"").unwrap(), None);
        assert_eq!(decode_body(b" \n").unwrap(), None);
        assert_eq!(
            decode_body(br#"{"message":"not found"}"#).unwrap(),
            Some(json!({"message": "not found"}))
        );
        assert!(matches!(
            decode_body(b"<html>bad gateway</html>"),
            Err(AdapterError::MalformedBody(_))
        ));
    }
}
