//! Handler for the administrative relay.

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, Uri};

use crate::auth::service::session_from_headers;
use crate::errors::AppError;
use crate::services::Relayed;
use crate::state::AppState;

const LOCAL_PREFIX: &str = "/api";

const UPSTREAM_PREFIX: &str = "/admin";

pub const INVALID_PATH_MESSAGE: &str = "Invalid admin path";

/// Relays `/api/admin/<rest>` to upstream `/admin/<rest>` with the same verb.
///
/// The path is taken from the raw URI so percent-encoding survives unchanged.
pub async fn relay_admin(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Relayed, AppError> {
    let session = session_from_headers(&headers);
    let upstream = upstream_path(uri.path())?;
    state
        .relay
        .relay(method, upstream, &session, query, &body)
        .await
}

/// Maps the local path onto the upstream admin tree. Any segment that decodes
/// to `.` or `..` is refused, since URL normalisation would move it out of
/// `/admin`.
fn upstream_path(local: &str) -> Result<&str, AppError> {
    let upstream = local.strip_prefix(LOCAL_PREFIX).unwrap_or(local);
    let rest = upstream
        .strip_prefix(UPSTREAM_PREFIX)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .ok_or_else(|| AppError::Validation(INVALID_PATH_MESSAGE.to_string()))?;

    for segment in rest.split('/') {
        let decoded = urlencoding::decode_binary(segment.as_bytes());
        if decoded.as_ref() == b"." || decoded.as_ref() == b".." {
            tracing::warn!(path = %local, "dot segment in admin path");
            return Err(AppError::Validation(INVALID_PATH_MESSAGE.to_string()));
        }
    }
    Ok(upstream)
}
