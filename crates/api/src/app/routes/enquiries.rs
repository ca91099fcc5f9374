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
use artisanhome_store::{EnquiryPatch, NewEnquiry};

use crate::app::{dto, errors, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route(
            "/",
            post(submit_enquiry).merge(middleware::admin(guard, get(list_enquiries))),
        )
        .route(
            "/:id",
            middleware::admin(guard, patch(update_enquiry).merge(delete(delete_enquiry))),
        )
}

/// Storefront contact form.
pub async fn submit_enquiry(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewEnquiry>, JsonRejection>,
) -> axum::response::Response {
    let draft = match dto::json_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    let enquiry = services.store.enquiries().add(draft);
    tracing::info!(id = %enquiry.id, city = %enquiry.city, "enquiry submitted");
    (StatusCode::CREATED, Json(enquiry)).into_response()
}

pub async fn list_enquiries(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::EnquiryListParams>,
) -> axum::response::Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let items = services.store.enquiries().query(&query);
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn update_enquiry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<EnquiryPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch = match dto::json_body(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let enquiries = services.store.enquiries();
    if !enquiries.contains(&id) {
        return errors::not_found("enquiry");
    }
    enquiries.update(&id, patch);

    match enquiries.find(&id) {
        Some(enquiry) => (StatusCode::OK, Json(enquiry)).into_response(),
        None => errors::not_found("enquiry"),
    }
}

pub async fn delete_enquiry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let enquiries = services.store.enquiries();
    if !enquiries.contains(&id) {
        return errors::not_found("enquiry");
    }
    enquiries.delete(&id);
    StatusCode::NO_CONTENT.into_response()
}
