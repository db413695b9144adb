use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::{Role, User};

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// 0 = user, 1 = admin
    #[schema(value_type = u8, example = 0)]
    pub role: Role,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_on: Option<DateTime<Utc>>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            role: u.role,
            created_on: Some(u.created_on),
            last_modified_on: Some(u.last_modified_on),
        }
    }
}

/// Request body for changing a user's role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRoleDto {
    /// 0/1 or "user"/"admin"
    #[schema(value_type = u8, example = 1)]
    pub role: Role,
}
