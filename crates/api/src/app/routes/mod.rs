use axum::Router;

use artisanhome_auth::Guard;

pub mod appointments;
pub mod auth;
pub mod content;
pub mod enquiries;
pub mod gallery;
pub mod settings;
pub mod system;

/// Everything mounted under `/api`. Guards are attached per method, since most
/// resources mix public and admin verbs on the same path.
pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route("/health", axum::routing::get(system::health))
        .nest("/auth", auth::router(guard))
        .nest("/enquiries", enquiries::router(guard))
        .nest("/appointments", appointments::router(guard))
        .nest("/gallery", gallery::router(guard))
        .nest("/content", content::router(guard))
        .nest("/settings", settings::router(guard))
}
