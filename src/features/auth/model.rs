use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::auth::policy::Permissions;
use crate::features::users::models::Role;

/// Identity attached to a request by the auth middleware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    #[schema(value_type = u8)]
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_role(self.role)
    }

    /// Admins see everything; users only what they own
    pub fn can_access_owned(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

/// Claims carried by issued access tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    pub role: Role,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn into_user(self) -> Option<AuthenticatedUser> {
        let user_id = Uuid::parse_str(&self.sub).ok()?;
        Some(AuthenticatedUser {
            user_id,
            email: self.email,
            full_name: self.name,
            role: self.role,
        })
    }
}
