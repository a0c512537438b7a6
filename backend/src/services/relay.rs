//! The authenticated relay: one browser request in, one upstream request out.
//!
//! The relay attaches the session's bearer token, forwards the JSON body for
//! POST and PUT, and hands back the upstream status and body untouched. It never
//! retries.

use std::sync::Arc;

use adapters::{IdentityProvider, UpstreamReply, UpstreamRequest};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::auth::models::Session;
use crate::auth::AuthError;
use crate::errors::AppError;

#[derive(Clone)]
pub struct Relay {
    provider: Arc<dyn IdentityProvider>,
}

impl Relay {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Sends a prepared request upstream.
    pub async fn forward(&self, request: UpstreamRequest) -> Result<Relayed, AppError> {
        let method = request.method.clone();
        let path = request.path.clone();

        let reply = self.provider.send(request).await?;
        tracing::debug!(%method, %path, status = reply.status, "relayed upstream");

        Relayed::from_reply(reply)
    }

    /// Relays a browser request: bearer from the session, query as-is, and the
    /// raw body decoded as JSON when the verb carries one.
    pub async fn relay(
        &self,
        method: Method,
        path: impl Into<String>,
        session: &Session,
        query: Option<String>,
        body: &[u8],
    ) -> Result<Relayed, AppError> {
        let body = if method == Method::POST || method == Method::PUT {
            json_body(body)?
        } else {
            None
        };

        let request = UpstreamRequest::new(method, path)
            .with_query(query)
            .with_bearer(session.token())
            .with_body(body);
        self.forward(request).await
    }
}

/// Decodes a request body. An empty body is `None`; anything else must be JSON.
pub fn json_body(bytes: &[u8]) -> Result<Option<Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|_| AuthError::InvalidBody.into())
}

/// An upstream reply ready to go back to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Relayed {
    pub fn from_reply(reply: UpstreamReply) -> Result<Self, AppError> {
        let status = StatusCode::from_u16(reply.status).map_err(|_| {
            AppError::MalformedUpstream(format!("unrepresentable status {}", reply.status))
        })?;
        Ok(Self {
            status,
            body: reply.body,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.body.as_ref()?.get(name)?.as_str()
    }
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None if self.status == StatusCode::NO_CONTENT
                || self.status == StatusCode::NOT_MODIFIED =>
            {
                self.status.into_response()
            }
            None => (self.status, Json(Value::Object(Default::default()))).into_response(),
        }
    }
}
