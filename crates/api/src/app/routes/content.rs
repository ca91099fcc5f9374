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
use artisanhome_store::{ContentPatch, NewContentItem};

use crate::app::{dto, errors, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route(
            "/",
            get(list_content).merge(middleware::admin(guard, post(add_content))),
        )
        .route(
            "/:id",
            get(get_content)
                .merge(middleware::admin(guard, patch(update_content).merge(delete(delete_content)))),
        )
}

pub async fn list_content(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ContentListParams>,
) -> axum::response::Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let items = services.store.content().query(&query);
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn get_content(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.store.content().find(&id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::not_found("content"),
    }
}

pub async fn add_content(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewContentItem>, JsonRejection>,
) -> axum::response::Response {
    let draft = match dto::json_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    let item = services.store.content().add(draft);
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn update_content(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ContentPatch>, JsonRejection>,
) -> axum::response::Response {
    let patch = match dto::json_body(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let content = services.store.content();
    if !content.contains(&id) {
        return errors::not_found("content");
    }
    content.update(&id, patch);

    match content.find(&id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::not_found("content"),
    }
}

pub async fn delete_content(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let content = services.store.content();
    if !content.contains(&id) {
        return errors::not_found("content");
    }
    content.delete(&id);
    StatusCode::NO_CONTENT.into_response()
}
