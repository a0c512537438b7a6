//! Request and reply shapes exchanged with the upstream identity provider.
//!
//! Payloads stay opaque `serde_json::Value`s; the upstream owns their schema.

use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    /// Path relative to the upstream base URL, always starting with `/`.
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            method,
            path,
            query: None,
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Attaches the bearer token. Empty tokens are dropped so no
    /// `Authorization` header is sent at all.
    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }
}

/// Status and decoded body of an upstream response.
///
/// `body` is `None` when the upstream sent no content.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Option<Value>,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads a top-level string field from the body.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.body.as_ref()?.get(name)?.as_str()
    }
}
