//! Middleware that gates page paths on the session cookies.
//!
//! The decision itself is a pure function of the path and the session, kept in
//! [`SessionGate::decide`] so it can be checked without a running router.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::borrow::Cow;
use std::sync::Arc;

use super::models::{GateDecision, Session};
use super::service::session_from_headers;
use crate::config::Config;

pub const LOGIN_PATH: &str = "/login";

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Path segment that marks an admin-only area.
pub const ADMIN_MARKER: &str = "admin";

const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone)]
pub struct SessionGate {
    protected_prefixes: Vec<String>,
    required_role: Option<String>,
}

impl SessionGate {
    pub fn new(protected_prefixes: Vec<String>, required_role: Option<String>) -> Self {
        Self {
            protected_prefixes,
            required_role,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.protected_paths.clone(), config.admin_role.clone())
    }

    /// Rules are checked in order and the first match wins.
    pub fn decide(&self, path: &str, session: &Session) -> GateDecision {
        if self.is_protected(path) && !session.is_authenticated() {
            return GateDecision::RedirectToLogin;
        }

        if path == LOGIN_PATH && session.is_authenticated() {
            return GateDecision::RedirectToDashboard;
        }

        if let Some(required) = &self.required_role {
            if is_admin_path(path) && session.role.as_deref() != Some(required.as_str()) {
                return GateDecision::RoleMismatch;
            }
        }

        GateDecision::Allow
    }

    fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
    }
}

/// Segment-aware prefix match: `/dashboard` covers `/dashboard/apps` but not
/// `/dashboards`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn is_admin_path(path: &str) -> bool {
    path.split('/').any(|segment| segment == ADMIN_MARKER)
}

/// Percent-decodes a request path so `/%64ashboard` is gated like `/dashboard`.
pub fn decoded_path(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode_binary(raw.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(raw),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Page paths get a 307. Relay paths get a 303 so the browser follows with a
/// GET instead of replaying a POST, PUT or DELETE against a page.
fn redirect(path: &str, to: &str) -> Response {
    if path.starts_with(API_PREFIX) {
        Redirect::to(to).into_response()
    } else {
        Redirect::temporary(to).into_response()
    }
}

/// Axum middleware running [`SessionGate::decide`] before any route.
pub async fn session_gate(
    State(gate): State<Arc<SessionGate>>,
    request: Request,
    next: Next,
) -> Response {
    let session = session_from_headers(request.headers());
    let path = decoded_path(request.uri().path()).into_owned();

    match gate.decide(&path, &session) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin => {
            tracing::debug!(%path, "no session, redirecting to login");
            redirect(&path, LOGIN_PATH)
        }
        GateDecision::RedirectToDashboard => {
            tracing::debug!(%path, "already signed in, redirecting to dashboard");
            redirect(&path, DASHBOARD_PATH)
        }
        GateDecision::RoleMismatch => {
            tracing::debug!(%path, role = ?session.role, "admin role required");
            redirect(&path, DASHBOARD_PATH)
        }
    }
}
