//! Route table for client applications, domains and scopes.
//!
//! The browser calls client applications "apps"; upstream they are `/clients`.

use axum::Router;

use crate::api::{relay_routes, RelayRoute, Verb};
use crate::state::AppState;

pub(crate) const DIRECTORY_RELAYS: &[RelayRoute] = &[
    RelayRoute::new(Verb::Get, "/api/apps", "/clients"),
    RelayRoute::new(Verb::Post, "/api/apps", "/clients"),
    RelayRoute::new(Verb::Get, "/api/domains", "/domains"),
    RelayRoute::new(Verb::Post, "/api/domains", "/domains"),
    RelayRoute::new(Verb::Get, "/api/scopes", "/scopes"),
];

pub fn directory_router() -> Router<AppState> {
    relay_routes(DIRECTORY_RELAYS)
}
