use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{UpdateUserRoleDto, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/User/GetAll",
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(users), None)))
}

/// Change a user's role (admin only)
///
/// Access tokens carry the role as a claim, so the change reaches the
/// affected user on their next sign-in. Tokens issued before it keep the
/// old role until they expire.
#[utoipa::path(
    put,
    path = "/api/User/UpdateRole/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Cannot demote yourself"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user_role(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserRoleDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    if id == admin.user_id && !dto.role.is_admin() {
        return Err(AppError::BadRequest(
            "You cannot remove your own admin role".to_string(),
        ));
    }

    let user = service.update_role(id, dto.role).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("User role updated successfully".to_string()),
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::users::routes;
    use crate::shared::test_helpers::{create_admin_user, lazy_pool, with_admin_auth, with_user_auth};

    use super::*;

    fn server(authenticate: fn(axum::Router) -> axum::Router) -> TestServer {
        let service = Arc::new(UserService::new(lazy_pool()));
        TestServer::new(authenticate(routes::routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_list_users_requires_admin() {
        let server = server(with_user_auth);
        let response = server.get("/api/User/GetAll").await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["status"], json!(false));
        assert_eq!(body["message"], json!("Admin access required"));
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_self() {
        let server = server(with_admin_auth);
        let admin = create_admin_user();

        let response = server
            .put(&format!("/api/User/UpdateRole/{}", admin.user_id))
            .json(&json!({ "role": "user" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("You cannot remove your own admin role"));
    }
}
