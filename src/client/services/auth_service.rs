use std::sync::Arc;

use tracing::info;
use validator::Validate;

use super::{invalid, ServiceResult};
use crate::client::api_client::ApiClient;
use crate::client::error::Result;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::policy::{check_access, Access, Permissions, Requirement};
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;

/// Sign-in, registration and the locally held session
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Authenticate and persist the token and profile on success
    pub async fn login(&self, email: &str, password: &str) -> Result<ServiceResult<UserResponseDto>> {
        let dto = LoginRequestDto {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<LoginResponseDto> = self.api.post("User/Login", &dto).await?;
        let result = ServiceResult::from_envelope(envelope);

        let Some(login) = result.data.filter(|_| result.success) else {
            return Ok(ServiceResult {
                success: false,
                message: result.message,
                data: None,
            });
        };

        self.api.tokens().set_token(&login.token)?;
        self.api.tokens().set_user(&login.user)?;
        info!("Signed in as {}", login.user.email);

        Ok(ServiceResult::ok(login.user, result.message))
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<ServiceResult<UserResponseDto>> {
        let dto = RegisterRequestDto {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<UserResponseDto> = self.api.post("User/Create", &dto).await?;
        Ok(envelope.into())
    }

    /// Forget the local session. The API keeps no server-side session.
    pub fn logout(&self) -> Result<()> {
        self.api.tokens().clear_auth()?;
        info!("Signed out");
        Ok(())
    }

    /// Current user with the server-computed permission table
    pub async fn me(&self) -> Result<ServiceResult<MeResponseDto>> {
        let envelope: ApiResponse<MeResponseDto> = self.api.get("User/Me").await?;
        Ok(envelope.into())
    }

    pub fn current_user(&self) -> Option<UserResponseDto> {
        self.api.tokens().get_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.tokens().has_token()
    }

    /// Permission table for the stored role; all false when signed out
    pub fn permissions(&self) -> Permissions {
        self.api
            .tokens()
            .role()
            .map(Permissions::for_role)
            .unwrap_or_default()
    }

    pub fn check_access(&self, requirement: Requirement) -> Access {
        check_access(self.api.tokens().role(), requirement)
    }
}
