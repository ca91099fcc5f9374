use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::app::errors;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn not_found() -> axum::response::Response {
    errors::not_found("route")
}
