//! SSO gate backend.
//!
//! A browser-facing server in front of an OAuth2/SSO identity provider. It gates
//! page paths on the session cookies, relays JSON API calls upstream with the
//! session's bearer token, and serves the built front-end.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub use config::Config;
pub use state::AppState;

/// Assembles the full router: health, relays, front-end fallback, with the
/// session gate and request tracing wrapped around all of it.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .merge(auth::auth_router())
        .merge(api::api_router());

    let router = match &state.config.static_dir {
        Some(dir) => router.fallback_service(middleware::frontend(dir)),
        None => router.fallback(middleware::not_found),
    };

    router
        .layer(axum::middleware::from_fn_with_state(
            state.gate.clone(),
            auth::session_gate,
        ))
        .layer(middleware::trace_layer())
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
