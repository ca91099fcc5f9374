use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use artisanhome_auth::Guard;
use artisanhome_store::SettingsPatch;

use crate::app::{dto, services::AppServices};
use crate::middleware;

pub fn router(guard: &Guard) -> Router {
    Router::new().route(
        "/",
        get(get_settings).merge(middleware::admin(guard, patch(update_settings))),
    )
}

pub async fn get_settings(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    (StatusCode::OK, Json(services.store.settings().get()))
}

pub async fn update_settings(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<SettingsPatch>, JsonRejection>,
) -> axum::response::Response {
    let patch = match dto::json_body(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let settings = services.store.settings();
    settings.update(patch);
    tracing::info!("site settings updated");
    (StatusCode::OK, Json(settings.get())).into_response()
}
