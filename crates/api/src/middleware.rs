use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{Next, from_fn_with_state},
    response::Response,
    routing::MethodRouter,
};
use chrono::Utc;

use artisanhome_auth::{Guard, Role};

use crate::app::errors;

/// Per-route guard configuration: which role (if any) the route demands.
#[derive(Clone, Debug)]
pub struct GuardState {
    pub guard: Guard,
    pub required: Option<Role>,
}

/// Authenticate the request and, when a role is required, check it in the same
/// pass. On success the `Authenticated` proof is attached for handlers.
pub async fn guard_request(
    State(state): State<GuardState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let now = Utc::now();

    let outcome = match state.required {
        Some(role) => state.guard.authorize(header, role, now),
        None => state.guard.authenticate(header, now),
    };

    match outcome {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// Wrap `route` so it only runs for a valid token.
pub fn authenticated(guard: &Guard, route: MethodRouter) -> MethodRouter {
    route.route_layer(from_fn_with_state(
        GuardState {
            guard: guard.clone(),
            required: None,
        },
        guard_request,
    ))
}

/// Wrap `route` so it only runs for an admin token.
pub fn admin(guard: &Guard, route: MethodRouter) -> MethodRouter {
    route.route_layer(from_fn_with_state(
        GuardState {
            guard: guard.clone(),
            required: Some(Role::Admin),
        },
        guard_request,
    ))
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    tracing::info!(
        %method,
        path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    res
}
