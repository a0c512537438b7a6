//! Defines the HTTP routes for profile management.

use axum::{routing::post, Router};

use super::handlers::change_password;
use crate::api::{relay_routes, RelayRoute, Verb};
use crate::state::AppState;

pub(crate) const PROFILE_RELAYS: &[RelayRoute] = &[
    RelayRoute::new(Verb::Post, "/api/profile/info", "/change-profile"),
    RelayRoute::new(Verb::Post, "/api/profile/avatar", "/change-avatar"),
];

pub fn profile_router() -> Router<AppState> {
    Router::new()
        .route("/api/profile/password", post(change_password))
        .merge(relay_routes(PROFILE_RELAYS))
}
