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
use artisanhome_store::{GalleryPatch, NewGalleryItem};

use crate::app::{dto, errors, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route(
            "/",
            get(list_gallery).merge(middleware::admin(guard, post(add_gallery_item))),
        )
        .route(
            "/:id",
            middleware::admin(guard, patch(update_gallery_item).merge(delete(delete_gallery_item))),
        )
}

pub async fn list_gallery(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::GalleryListParams>,
) -> impl IntoResponse {
    let items = services.store.gallery().query(&params.into_query());
    (StatusCode::OK, Json(json!({ "items": items })))
}

pub async fn add_gallery_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewGalleryItem>, JsonRejection>,
) -> axum::response::Response {
    let draft = match dto::json_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    let item = services.store.gallery().add(draft);
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn update_gallery_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<GalleryPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch = match dto::json_body(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let gallery = services.store.gallery();
    if !gallery.contains(&id) {
        return errors::not_found("gallery item");
    }
    gallery.update(&id, patch);

    match gallery.find(&id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::not_found("gallery item"),
    }
}

pub async fn delete_gallery_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_stamp(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let gallery = services.store.gallery();
    if !gallery.contains(&id) {
        return errors::not_found("gallery item");
    }
    gallery.delete(&id);
    StatusCode::NO_CONTENT.into_response()
}
