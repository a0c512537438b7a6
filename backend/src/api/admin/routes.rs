//! Defines the HTTP routes for administrative CRUD.

use axum::{routing::get, Router};

use super::handlers::relay_admin;
use crate::state::AppState;

pub fn admin_router() -> Router<AppState> {
    Router::new().route(
        "/api/admin/*path",
        get(relay_admin)
            .post(relay_admin)
            .put(relay_admin)
            .delete(relay_admin),
    )
}
