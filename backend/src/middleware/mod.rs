//! General-purpose middleware for the API.
//!
//! Request tracing for every route, plus the fallback that serves the built
//! front-end (or a JSON 404 when there is none).

use std::path::Path;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{HttpMakeClassifier, TraceLayer};

pub fn trace_layer() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
}

/// Serves files from `dir`, falling back to `index.html` so client-side routes
/// resolve.
pub fn frontend(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
