use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category routes (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/Category/GetAll", get(handlers::list_categories))
        .with_state(service)
}

/// Category management routes (admin only, behind the auth middleware)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/Category/Create", post(handlers::create_category))
        .route("/api/Category/Update/{id}", put(handlers::update_category))
        .route("/api/Category/Delete/{id}", delete(handlers::delete_category))
        .with_state(service)
}
