//! Defines the HTTP routes specifically for authentication.
//!
//! Login, logout and register need their own handlers; `/me` is a plain relay.

use axum::{routing::post, Router};

use super::handlers::{login, logout, register};
use crate::api::{relay_routes, RelayRoute, Verb};
use crate::state::AppState;

pub(crate) const AUTH_RELAYS: &[RelayRoute] = &[RelayRoute::new(Verb::Get, "/api/auth/me", "/me")];

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/register", post(register))
        .merge(relay_routes(AUTH_RELAYS))
}
