use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, UserAgent};
use crate::features::auth::guards::{ensure_permission, RequireAdmin};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::Permission;
use crate::features::complaints::dtos::{
    ComplaintResponseDto, DirectionsResponseDto, SubmitComplaintForm, UpdateComplaintStatusDto,
};
use crate::features::complaints::location::{Coordinates, Platform};
use crate::features::complaints::services::{ComplaintService, MediaUpload, NewComplaint};
use crate::shared::constants::MAX_TITLE_LENGTH;
use crate::shared::types::ApiResponse;

fn title_too_long() -> String {
    format!("Title must not exceed {} characters", MAX_TITLE_LENGTH)
}

/// List every complaint (admin only)
#[utoipa::path(
    get,
    path = "/api/Complaint/GetAll",
    responses(
        (status = 200, description = "All complaints, newest first", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "complaints",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_complaints(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(complaints), None)))
}

/// List the caller's own complaints
///
/// A user with no complaints gets an empty list, not an error.
#[utoipa::path(
    get,
    path = "/api/Complaint/GetAllUserComplaints",
    responses(
        (status = 200, description = "Caller's complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    tag = "complaints",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_user_complaints(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_for_user(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(complaints), None)))
}

/// Get one complaint (submitter or admin)
#[utoipa::path(
    get,
    path = "/api/Complaint/Get/{id}",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    responses(
        (status = 200, description = "Complaint found", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Not the submitter"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None)))
}

/// Directions deep link for a complaint's location
///
/// The link targets the maps app matching the caller's `User-Agent`.
#[utoipa::path(
    get,
    path = "/api/Complaint/Directions/{id}",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    responses(
        (status = 200, description = "Directions link", body = ApiResponse<DirectionsResponseDto>),
        (status = 400, description = "Complaint has no location"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_directions(
    user: AuthenticatedUser,
    UserAgent(agent): UserAgent,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DirectionsResponseDto>>> {
    let directions = service
        .directions(&user, id, Platform::from_user_agent(&agent))
        .await?;
    Ok(Json(ApiResponse::success(Some(directions), None)))
}

/// Submit a complaint
///
/// Accepts multipart/form-data with:
/// - `title`, `description`, `categoryId`: required
/// - `latitude`, `longitude`: optional, both or neither
/// - `file`: required field; a zero-byte file means no photo
#[utoipa::path(
    post,
    path = "/api/Complaint/Submit",
    tag = "complaints",
    request_body(
        content = SubmitComplaintForm,
        content_type = "multipart/form-data",
        description = "Complaint form with photo",
    ),
    responses(
        (status = 201, description = "Complaint submitted", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Invalid form or photo"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "Request too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    let complaint = read_submission(multipart).await?;
    let created = service.submit(&user, complaint).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Complaint submitted successfully".to_string()),
        )),
    ))
}

async fn read_submission(mut multipart: Multipart) -> Result<NewComplaint> {
    let mut title = String::new();
    let mut description = String::new();
    let mut category_id: Option<String> = None;
    let mut latitude: Option<String> = None;
    let mut longitude: Option<String> = None;
    let mut file: Option<MediaUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        // Form field names arrive as camelCase or PascalCase
        let field_name = field.name().unwrap_or("").to_ascii_lowercase();

        if field_name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;
            file = Some(MediaUpload {
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;
        match field_name.as_str() {
            "title" => title = text,
            "description" => description = text,
            "categoryid" | "category_id" => category_id = Some(text),
            "latitude" => latitude = Some(text),
            "longitude" => longitude = Some(text),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if title.trim().chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::Validation(title_too_long()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let category_id = category_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;
    let category_id = Uuid::parse_str(category_id)
        .map_err(|_| AppError::Validation("Invalid category id".to_string()))?;

    let coordinates = Coordinates::parse(latitude.as_deref(), longitude.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(NewComplaint {
        title,
        description,
        category_id,
        coordinates,
        // zero-byte placeholder from clients with no photo
        media: Some(file).filter(|f| !f.data.is_empty()),
    })
}

/// Change a complaint's status (admin only)
///
/// Any status may be set from any other.
#[utoipa::path(
    put,
    path = "/api/Complaint/UpdateStatus/{id}",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    request_body = UpdateComplaintStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Missing the status-update permission"),
        (status = 404, description = "Complaint or status not found")
    ),
    tag = "complaints",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_complaint_status(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateComplaintStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    ensure_permission(&user, Permission::UpdateComplaintStatus)?;

    let complaint = service.update_status(id, dto.status_id).await?;
    Ok(Json(ApiResponse::success(
        Some(complaint),
        Some("Complaint status updated successfully".to_string()),
    )))
}
