use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{invalid, ServiceResult};
use crate::client::api_client::ApiClient;
use crate::client::error::Result;
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::shared::types::ApiResponse;

pub struct CategoryService {
    api: Arc<ApiClient>,
}

impl CategoryService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<ServiceResult<Vec<CategoryResponseDto>>> {
        let envelope: ApiResponse<Vec<CategoryResponseDto>> =
            self.api.get("Category/GetAll").await?;
        Ok(envelope.into())
    }

    /// Validated locally with the same rules the server applies
    pub async fn create(
        &self,
        dto: CategoryRequestDto,
    ) -> Result<ServiceResult<CategoryResponseDto>> {
        let dto = dto.normalized();
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<CategoryResponseDto> =
            self.api.post("Category/Create", &dto).await?;
        Ok(envelope.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: CategoryRequestDto,
    ) -> Result<ServiceResult<CategoryResponseDto>> {
        let dto = dto.normalized();
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<CategoryResponseDto> = self
            .api
            .put(&format!("Category/Update/{}", id), &dto)
            .await?;
        Ok(envelope.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<ServiceResult<()>> {
        let envelope: ApiResponse<()> = self.api.delete(&format!("Category/Delete/{}", id)).await?;
        Ok(envelope.into())
    }
}
