use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{conflict_on_unique, AppError, Result};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::{Role, User};

/// Service for user account persistence
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every account, newest first
    pub async fn list_all(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, role, created_on, last_modified_on
            FROM users
            ORDER BY created_on DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    /// Look up an account by its login email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, role, created_on, last_modified_on
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn create(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, password_hash, role, created_on, last_modified_on
            "#,
        )
        .bind(full_name.trim())
        .bind(email.trim())
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email is already registered"))?;

        tracing::info!("User created: id={}, role={}", user.id, user.role);
        Ok(user)
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, last_modified_on = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, password_hash, role, created_on, last_modified_on
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user role: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        tracing::info!("User {} role changed to {}", user.id, user.role);
        Ok(user.into())
    }
}
