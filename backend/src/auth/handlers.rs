//! Handler functions for the authentication relays.
//!
//! Login and logout are the only relays that write the session cookies;
//! registration is checked locally before it is forwarded.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use adapters::UpstreamRequest;

use super::errors::AuthError;
use super::models::{LoginRequest, RegisterForm};
use super::service::{clear_session, is_cookie_safe, session_from_headers, set_session};
use crate::errors::AppError;
use crate::services::{json_body, Relayed};
use crate::state::AppState;

/// Decodes a JSON form, keeping the raw value for forwarding.
pub(crate) fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<(T, Value), AppError> {
    let value = json_body(body)?.ok_or(AuthError::InvalidBody)?;
    let form = serde_json::from_value(value.clone()).map_err(|_| AuthError::InvalidBody)?;
    Ok((form, value))
}

/// `POST /api/auth/login`: relays the credentials and, on success, stores the
/// returned token in the session cookie.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let (form, _): (LoginRequest, _) = parse_form(&body)?;
    form.validate()?;

    let request = UpstreamRequest::post("/login")
        .with_body(Some(json!({ "email": form.email, "password": form.password })));
    let relayed = state.relay.forward(request).await?;

    if !relayed.is_success() {
        tracing::info!(status = %relayed.status, "login rejected upstream");
        return Ok(relayed.into_response());
    }

    let token = relayed
        .str_field("access_token")
        .filter(|t| is_cookie_safe(t))
        .ok_or(AuthError::MissingToken)?
        .to_string();
    let role = relayed.str_field("role").map(str::to_owned);

    let mut response = relayed.into_response();
    set_session(
        response.headers_mut(),
        &token,
        role.as_deref(),
        state.cookie_settings(),
    );
    tracing::info!(role = ?role, "login succeeded, session issued");
    Ok(response)
}

/// `POST /api/auth/logout`: tells the upstream on a best-effort basis, then
/// always clears the session cookies.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = session_from_headers(&headers);
    let request = UpstreamRequest::post("/logout").with_bearer(session.token());
    match state.relay.forward(request).await {
        Ok(relayed) if !relayed.is_success() => {
            tracing::info!(status = %relayed.status, "upstream logout refused, clearing anyway")
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(error = %err, "upstream logout failed, clearing anyway"),
    }

    let mut response = (StatusCode::OK, Json(json!({ "message": "Logged out" }))).into_response();
    clear_session(response.headers_mut(), state.cookie_settings());
    tracing::info!("session cleared");
    response
}

/// `POST /api/auth/register`: checks the form, then forwards the whole body.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, AppError> {
    let (form, value): (RegisterForm, _) = parse_form(&body)?;
    form.validate()?;

    let session = session_from_headers(&headers);
    let request = UpstreamRequest::post("/register")
        .with_bearer(session.token())
        .with_body(Some(value));
    state.relay.forward(request).await
}
