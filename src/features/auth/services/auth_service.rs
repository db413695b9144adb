use std::sync::Arc;

use crate::core::config::AdminSeed;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, RegisterRequestDto};
use crate::features::auth::services::TokenService;
use crate::features::auth::{hash_password, verify_password};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::Role;
use crate::features::users::UserService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for login and self-registration
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        // argon2 blocks; run it off the async workers
        let stored_hash = user.password_hash.clone();
        let password = dto.password;
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))?;

        if !valid {
            tracing::info!("Failed login attempt for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self.tokens.issue(&user)?;
        tracing::info!("User {} logged in", user.id);

        Ok(LoginResponseDto {
            token: issued.token,
            expires_at: Some(issued.expires_at),
            user: user.into(),
        })
    }

    /// Create a regular user account
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let password = dto.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))??;

        let user = self
            .users
            .create(&dto.full_name, &dto.email, &password_hash, Role::User)
            .await?;

        Ok(user.into())
    }

    /// Create the first admin account unless the email is already taken
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> Result<()> {
        if let Some(existing) = self.users.find_by_email(&seed.email).await? {
            if !existing.role.is_admin() {
                tracing::warn!(
                    "Seed admin email {} belongs to a non-admin account; leaving it unchanged",
                    seed.email
                );
            }
            return Ok(());
        }

        let password = seed.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))??;

        let admin = self
            .users
            .create(&seed.full_name, &seed.email, &password_hash, Role::Admin)
            .await?;
        tracing::info!("Seeded admin account {}", admin.id);
        Ok(())
    }
}
