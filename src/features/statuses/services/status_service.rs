use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{conflict_on_unique, AppError, Result};
use crate::features::statuses::dtos::StatusResponseDto;
use crate::features::statuses::models::Status;
use crate::shared::constants::DEFAULT_STATUS_NAME;

const DUPLICATE_NAME: &str = "A status with this name already exists";

/// Service for status operations
pub struct StatusService {
    pool: PgPool,
}

impl StatusService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all statuses in workflow order
    pub async fn list(&self) -> Result<Vec<StatusResponseDto>> {
        let statuses = sqlx::query_as::<_, Status>(
            r#"
            SELECT id, name, position, created_on, last_modified_on
            FROM statuses
            ORDER BY position, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list statuses: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(statuses.into_iter().map(|s| s.into()).collect())
    }

    /// Append a status after the current last position
    pub async fn create(&self, name: &str) -> Result<StatusResponseDto> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            INSERT INTO statuses (name, position)
            VALUES ($1, COALESCE((SELECT MAX(position) + 1 FROM statuses), 0))
            RETURNING id, name, position, created_on, last_modified_on
            "#,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?;

        tracing::info!("Created status {} at position {}", status.name, status.position);
        Ok(status.into())
    }

    pub async fn rename(&self, id: Uuid, name: &str) -> Result<StatusResponseDto> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            UPDATE statuses
            SET name = $2, last_modified_on = NOW()
            WHERE id = $1
            RETURNING id, name, position, created_on, last_modified_on
            "#,
        )
        .bind(id)
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?
        .ok_or_else(|| AppError::NotFound("Status not found".to_string()))?;

        tracing::info!("Renamed status {} to {}", id, status.name);
        Ok(status.into())
    }

    /// Delete a status; complaints holding it fall back to "Unknown"
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM statuses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete status {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Status not found".to_string()));
        }

        tracing::info!("Deleted status {}", id);
        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<StatusResponseDto>> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            SELECT id, name, position, created_on, last_modified_on
            FROM statuses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|s| s.into()))
    }

    /// Status given to new complaints: "Pending" (any case), else the first
    /// by position, else none.
    pub async fn default_status(&self) -> Result<Option<StatusResponseDto>> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            SELECT id, name, position, created_on, last_modified_on
            FROM statuses
            ORDER BY (LOWER(name) = LOWER($1)) DESC, position, name
            LIMIT 1
            "#,
        )
        .bind(DEFAULT_STATUS_NAME)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|s| s.into()))
    }
}
