//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use adapters::HttpIdentityProvider;
use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use backend::{app, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

pub const SIGNED_IN: &str = "access_token=tok123";

pub const SIGNED_IN_ADMIN: &str = "access_token=tok123; role=admin";

/// Builds the router against `upstream`, with extra environment overrides.
pub fn router_with(upstream: &str, vars: &[(&str, &str)]) -> Router {
    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert("AUTH_API_URL".to_string(), upstream.to_string());

    let config = Config::from_lookup(|key| env.get(key).cloned()).unwrap();
    let provider = HttpIdentityProvider::new(upstream).unwrap();
    app(AppState::new(config, Arc::new(provider)))
}

pub fn router(upstream: &str) -> Router {
    router_with(upstream, &[])
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response), Some(to));
}

/// Relay paths redirect with 303 so the browser follows with a GET.
pub fn assert_see_other(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), Some(to));
}
