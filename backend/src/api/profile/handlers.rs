//! Handler functions for profile endpoints that need more than a plain relay.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use adapters::UpstreamRequest;

use crate::auth::handlers::parse_form;
use crate::auth::models::ChangePasswordForm;
use crate::auth::service::{clear_session, session_from_headers};
use crate::errors::AppError;
use crate::state::AppState;

/// `POST /api/profile/password`: relays a password change. A successful change
/// invalidates the current token upstream, so the session cookies are cleared.
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let (form, value): (ChangePasswordForm, _) = parse_form(&body)?;
    form.validate()?;

    let session = session_from_headers(&headers);
    let request = UpstreamRequest::post("/change-password")
        .with_bearer(session.token())
        .with_body(Some(value));
    let relayed = state.relay.forward(request).await?;

    let success = relayed.is_success();
    let mut response = relayed.into_response();
    if success {
        clear_session(response.headers_mut(), state.cookie_settings());
        tracing::info!("password changed, session cleared");
    }
    Ok(response)
}
