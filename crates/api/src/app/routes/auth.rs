use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use artisanhome_auth::{Authenticated, Guard, login};

use crate::app::{dto, errors, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout))
        .route("/me", middleware::authenticated(guard, get(me)))
}

pub async fn login_handler(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    if body.email.trim().is_empty() || body.password.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and password required",
        );
    }

    // bcrypt verification is CPU-bound.
    let outcome = tokio::task::spawn_blocking(move || {
        login(
            services.users.as_ref(),
            services.tokens.as_ref(),
            &body.email,
            &body.password,
            Utc::now(),
        )
    })
    .await;

    match outcome {
        Ok(Ok(session)) => (StatusCode::OK, Json(session)).into_response(),
        Ok(Err(e)) => errors::login_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "login task failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "login_failed", "login failed")
        }
    }
}

/// Tokens are stateless; the client drops its copy.
pub async fn logout() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "message": "logged out" })))
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Authenticated>,
) -> axum::response::Response {
    match services.users.find_by_id(&session.principal().user_id) {
        Some(account) => (StatusCode::OK, Json(account.profile())).into_response(),
        None => errors::not_found("user"),
    }
}
