use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// User administration routes (admin only, behind the auth middleware)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/User/GetAll", get(handlers::list_users))
        .route("/api/User/UpdateRole/{id}", put(handlers::update_user_role))
        .with_state(service)
}
