use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::statuses::models::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

impl From<Status> for StatusResponseDto {
    fn from(s: Status) -> Self {
        Self {
            id: s.id,
            name: s.name,
            position: s.position,
        }
    }
}

/// Request DTO for creating or renaming a status
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StatusRequestDto {
    #[validate(
        custom(function = "crate::shared::validation::validate_not_blank"),
        length(max = 50, message = "Status name must not exceed 50 characters")
    )]
    pub name: String,
}
