use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::statuses::handlers;
use crate::features::statuses::services::StatusService;

/// Public status routes (no authentication required)
pub fn public_routes(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/api/Status/GetAll", get(handlers::list_statuses))
        .with_state(service)
}

/// Status management routes (admin only, behind the auth middleware)
pub fn admin_routes(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/api/Status/Create", post(handlers::create_status))
        .route("/api/Status/Update/{id}", put(handlers::update_status))
        .route("/api/Status/Delete/{id}", delete(handlers::delete_status))
        .with_state(service)
}
