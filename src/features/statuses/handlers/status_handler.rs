use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::statuses::dtos::{StatusRequestDto, StatusResponseDto};
use crate::features::statuses::services::StatusService;
use crate::shared::types::ApiResponse;

/// List all statuses in workflow order
#[utoipa::path(
    get,
    path = "/api/Status/GetAll",
    responses(
        (status = 200, description = "List of statuses", body = ApiResponse<Vec<StatusResponseDto>>),
    ),
    tag = "statuses"
)]
pub async fn list_statuses(
    State(service): State<Arc<StatusService>>,
) -> Result<Json<ApiResponse<Vec<StatusResponseDto>>>> {
    let statuses = service.list().await?;
    Ok(Json(ApiResponse::success(Some(statuses), None)))
}

/// Create a status at the end of the list (admin only)
#[utoipa::path(
    post,
    path = "/api/Status/Create",
    request_body = StatusRequestDto,
    responses(
        (status = 201, description = "Status created", body = ApiResponse<StatusResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Duplicate name")
    ),
    tag = "statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatusService>>,
    AppJson(dto): AppJson<StatusRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<StatusResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let status = service.create(&dto.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(status),
            Some("Status created successfully".to_string()),
        )),
    ))
}

/// Rename a status (admin only)
#[utoipa::path(
    put,
    path = "/api/Status/Update/{id}",
    params(
        ("id" = Uuid, Path, description = "Status ID")
    ),
    request_body = StatusRequestDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<StatusResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Status not found")
    ),
    tag = "statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatusService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<StatusRequestDto>,
) -> Result<Json<ApiResponse<StatusResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let status = service.rename(id, &dto.name).await?;
    Ok(Json(ApiResponse::success(
        Some(status),
        Some("Status updated successfully".to_string()),
    )))
}

/// Delete a status (admin only)
#[utoipa::path(
    delete,
    path = "/api/Status/Delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Status ID")
    ),
    responses(
        (status = 200, description = "Status deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Status not found")
    ),
    tag = "statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatusService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Status deleted successfully".to_string()),
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::statuses::routes;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_user_auth};

    fn server(authenticate: fn(axum::Router) -> axum::Router) -> TestServer {
        let service = Arc::new(StatusService::new(lazy_pool()));
        TestServer::new(authenticate(routes::admin_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let response = server(with_admin_auth)
            .post("/api/Status/Create")
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Field must not be blank"));
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let response = server(with_user_auth)
            .post("/api/Status/Create")
            .json(&json!({ "name": "Escalated" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_id() {
        let response = server(with_admin_auth)
            .put("/api/Status/Update/not-a-uuid")
            .json(&json!({ "name": "Escalated" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
