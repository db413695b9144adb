use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;
use crate::shared::constants::MAX_MEDIA_SIZE;

/// Complaint routes (behind the auth middleware)
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route("/api/Complaint/GetAll", get(handlers::list_complaints))
        .route(
            "/api/Complaint/GetAllUserComplaints",
            get(handlers::list_user_complaints),
        )
        .route("/api/Complaint/Get/{id}", get(handlers::get_complaint))
        .route("/api/Complaint/Directions/{id}", get(handlers::get_directions))
        .route(
            "/api/Complaint/Submit",
            // photo limit plus room for the multipart envelope
            post(handlers::submit_complaint).layer(DefaultBodyLimit::max(MAX_MEDIA_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/Complaint/UpdateStatus/{id}",
            put(handlers::update_complaint_status),
        )
        .with_state(service)
}
