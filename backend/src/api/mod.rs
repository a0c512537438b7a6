//! Central module for organizing the application's relay endpoints.
//!
//! Most relays are plain: one local path and verb mapped to one upstream path.
//! Those are declared as [`RelayRoute`] tables and turned into routes by
//! [`relay_routes`]. Authentication routes are handled separately in `auth`.

pub mod admin;
pub mod directory;
pub mod profile;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method};
use axum::routing::{on, MethodFilter};
use axum::Router;

use crate::auth::service::session_from_headers;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

/// A local endpoint relayed to a fixed upstream path with the same verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayRoute {
    pub verb: Verb,
    pub local: &'static str,
    pub upstream: &'static str,
}

impl RelayRoute {
    pub const fn new(verb: Verb, local: &'static str, upstream: &'static str) -> Self {
        Self {
            verb,
            local,
            upstream,
        }
    }
}

/// Builds one route per table entry. Entries sharing a local path are merged
/// into a single method router.
pub fn relay_routes(table: &[RelayRoute]) -> Router<AppState> {
    table.iter().copied().fold(Router::new(), |router, route| {
        router.route(
            route.local,
            on(
                route.verb.filter(),
                move |State(state): State<AppState>,
                      headers: HeaderMap,
                      RawQuery(query): RawQuery,
                      body: Bytes| async move {
                    let session = session_from_headers(&headers);
                    state
                        .relay
                        .relay(route.verb.method(), route.upstream, &session, query, &body)
                        .await
                },
            ),
        )
    })
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(directory::routes::directory_router())
        .merge(profile::routes::profile_router())
        .merge(admin::routes::admin_router())
}
