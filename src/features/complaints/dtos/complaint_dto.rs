use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::complaints::location::Coordinates;
use crate::features::complaints::models::ComplaintRow;
use crate::features::complaints::workflow::{self, StatusKind};

/// Response DTO for complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub category_name: String,
    #[serde(default)]
    pub status_id: Option<Uuid>,
    pub status_name: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    /// Decimal degrees as a string, e.g. "-6.200000"
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
}

impl ComplaintResponseDto {
    pub fn status(&self) -> StatusKind {
        StatusKind::from_name(&self.status_name)
    }

    pub fn days_pending(&self, now: DateTime<Utc>) -> i64 {
        workflow::days_pending(self.created_on, now)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        workflow::is_overdue(self.created_on, now)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(self.latitude.as_deref(), self.longitude.as_deref())
            .ok()
            .flatten()
    }
}

impl From<ComplaintRow> for ComplaintResponseDto {
    fn from(row: ComplaintRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            status_id: row.status_id,
            status_name: row.status_name,
            user_id: row.user_id,
            user_name: row.user_name,
            user_email: row.user_email,
            latitude: row.latitude.map(|v| v.to_string()),
            longitude: row.longitude.map(|v| v.to_string()),
            media_url: row.media_url,
            created_on: row.created_on,
            last_modified_on: row.last_modified_on,
        }
    }
}

/// Submit complaint form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitComplaintForm {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    #[schema(example = "-6.200000")]
    pub latitude: Option<String>,
    #[schema(example = "106.816666")]
    pub longitude: Option<String>,
    /// Photo (JPEG, PNG or GIF, at most 10MB). Always present; zero bytes means no photo.
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Request body for changing a complaint's status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintStatusDto {
    pub status_id: Uuid,
}

/// Deep link for navigating to a complaint's location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResponseDto {
    pub url: String,
    /// "android", "apple" or "web"
    pub platform: String,
    pub latitude: String,
    pub longitude: String,
}
