//! Role-based authorization guards.
//!
//! Guards extract the [`AuthenticatedUser`] placed in the request extensions by
//! the auth middleware and reject the request before the handler body runs.
//! Plain `AuthenticatedUser` in a handler signature already requires a signed
//! in user of any role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::Permission;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Check a single permission from the role table inside a handler
pub fn ensure_permission(user: &AuthenticatedUser, permission: Permission) -> Result<(), AppError> {
    if user.permissions().allows(permission) {
        Ok(())
    } else {
        tracing::debug!("User {} lacks {:?}", user.user_id, permission);
        Err(AppError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_regular_user};

    #[test]
    fn test_ensure_permission_follows_role_table() {
        let admin = create_admin_user();
        let user = create_regular_user();

        assert!(ensure_permission(&admin, Permission::UpdateComplaintStatus).is_ok());
        assert!(ensure_permission(&user, Permission::CreateComplaint).is_ok());

        let err = ensure_permission(&user, Permission::UpdateComplaintStatus).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(
            err.to_string(),
            "Forbidden: You do not have permission to perform this action"
        );
    }
}
