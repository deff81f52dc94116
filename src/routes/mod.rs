pub mod spaces;

use crate::{
    AppState,
    db::models::api::HealthStatus,
    middleware::{auth::auth_middleware, logger::logger, request_tracking_middleware},
};
use axum::{
    Json, Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{any, get},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    // `/spaces` requires a verified caller; preflight is answered before auth
    let mut spaces_routes = Router::new()
        .route("/spaces", any(spaces::handle_spaces))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    if let Some(cors) = state.dispatcher.cors().preflight_layer() {
        spaces_routes = spaces_routes.layer(cors);
    }

    Router::new()
        .route("/health", get(health))
        .merge(spaces_routes)
        .with_state(state)
        .layer(from_fn(request_tracking_middleware))
        .layer(from_fn(logger))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
