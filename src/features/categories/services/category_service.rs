use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{conflict_on_unique, AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;

const DUPLICATE_NAME: &str = "A category with this name already exists";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, icon, color, created_on, last_modified_on
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let dto = dto.normalized();
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, icon, color)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, icon, color, created_on, last_modified_on
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.icon)
        .bind(&dto.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?;

        tracing::info!("Created category {} ({})", category.name, category.id);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let dto = dto.normalized();
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, icon = $4, color = $5, last_modified_on = NOW()
            WHERE id = $1
            RETURNING id, name, description, icon, color, created_on, last_modified_on
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.icon)
        .bind(&dto.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        tracing::info!("Updated category {}", id);
        Ok(category.into())
    }

    /// Delete a category; complaints keep their rows with no category
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        tracing::info!("Deleted category {}", id);
        Ok(())
    }
}
