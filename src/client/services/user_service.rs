use std::sync::Arc;

use uuid::Uuid;

use super::ServiceResult;
use crate::client::api_client::ApiClient;
use crate::client::error::Result;
use crate::features::users::dtos::{UpdateUserRoleDto, UserResponseDto};
use crate::features::users::models::Role;
use crate::shared::types::ApiResponse;

/// Admin-only account management
pub struct UserService {
    api: Arc<ApiClient>,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<ServiceResult<Vec<UserResponseDto>>> {
        let envelope: ApiResponse<Vec<UserResponseDto>> = self.api.get("User/GetAll").await?;
        Ok(envelope.into())
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> Result<ServiceResult<UserResponseDto>> {
        let envelope: ApiResponse<UserResponseDto> = self
            .api
            .put(&format!("User/UpdateRole/{}", id), &UpdateUserRoleDto { role })
            .await?;
        Ok(envelope.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeBackend;
    use axum::{extract::Path, routing::put, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_update_role_sends_numeric_code() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/User/UpdateRole/{id}",
            put(|Path(id): Path<Uuid>, Json(body): Json<Value>| async move {
                Json(json!({
                    "status": true,
                    "message": "Role updated",
                    "data": {
                        "id": id,
                        "fullName": "Budi",
                        "email": "budi@example.com",
                        "role": body["role"]
                    }
                }))
            }),
        ))
        .await;
        let users = UserService::new(backend.api().clone());

        let result = users.update_role(Uuid::from_u128(9), Role::Admin).await.unwrap();

        let user = result.data.unwrap();
        assert_eq!(user.id, Uuid::from_u128(9));
        assert_eq!(user.role, Role::Admin);
    }
}
