use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;

use artisanhome_auth::Guard;
use artisanhome_store::{AppointmentPatch, NewAppointment};

use crate::app::{dto, errors, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route(
            "/",
            post(book_appointment).merge(middleware::admin(guard, get(list_appointments))),
        )
        .route(
            "/:id",
            middleware::admin(guard, patch(update_appointment).merge(delete(delete_appointment))),
        )
}

/// Storefront booking form.
pub async fn book_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewAppointment>, JsonRejection>,
) -> axum::response::Response {
    let draft = match dto::json_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    let appointment = services.store.appointments().add(draft);
    tracing::info!(id = %appointment.id, date = %appointment.date, "appointment booked");
    (StatusCode::CREATED, Json(appointment)).into_response()
}

pub async fn list_appointments(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::AppointmentListParams>,
) -> axum::response::Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let items = services.store.appointments().query(&query);
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn update_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<AppointmentPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch = match dto::json_body(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let appointments = services.store.appointments();
    if !appointments.contains(&id) {
        return errors::not_found("appointment");
    }
    appointments.update(&id, patch);

    match appointments.find(&id) {
        Some(appointment) => (StatusCode::OK, Json(appointment)).into_response(),
        None => errors::not_found("appointment"),
    }
}

pub async fn delete_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let appointments = services.store.appointments();
    if !appointments.contains(&id) {
        return errors::not_found("appointment");
    }
    appointments.delete(&id);
    StatusCode::NO_CONTENT.into_response()
}
