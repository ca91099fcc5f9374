use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use artisanhome_auth::{AuthError, LoginError};
use artisanhome_core::DomainError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "authentication required")
        }
        AuthError::Forbidden(role) => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            format!("requires role '{role}'"),
        ),
    }
}

pub fn login_error_to_response(err: LoginError) -> axum::response::Response {
    match err {
        LoginError::Auth(AuthError::Unauthenticated) => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "invalid credentials")
        }
        LoginError::Auth(e) => auth_error_to_response(e),
        other => {
            tracing::error!(error = %other, "login failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "login_failed", "login failed")
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn not_found(what: &str) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
