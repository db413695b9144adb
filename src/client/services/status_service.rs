use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{invalid, ServiceResult};
use crate::client::api_client::ApiClient;
use crate::client::error::Result;
use crate::features::statuses::dtos::{StatusRequestDto, StatusResponseDto};
use crate::shared::types::ApiResponse;

pub struct StatusService {
    api: Arc<ApiClient>,
}

impl StatusService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Statuses in display order
    pub async fn list(&self) -> Result<ServiceResult<Vec<StatusResponseDto>>> {
        let envelope: ApiResponse<Vec<StatusResponseDto>> = self.api.get("Status/GetAll").await?;
        let mut result = ServiceResult::from_envelope(envelope);
        if let Some(statuses) = result.data.as_mut() {
            statuses.sort_by_key(|s| s.position);
        }
        Ok(result)
    }

    pub async fn create(&self, name: &str) -> Result<ServiceResult<StatusResponseDto>> {
        let dto = StatusRequestDto {
            name: name.trim().to_string(),
        };
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<StatusResponseDto> = self.api.post("Status/Create", &dto).await?;
        Ok(envelope.into())
    }

    pub async fn rename(&self, id: Uuid, name: &str) -> Result<ServiceResult<StatusResponseDto>> {
        let dto = StatusRequestDto {
            name: name.trim().to_string(),
        };
        dto.validate().map_err(invalid)?;

        let envelope: ApiResponse<StatusResponseDto> = self
            .api
            .put(&format!("Status/Update/{}", id), &dto)
            .await?;
        Ok(envelope.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<ServiceResult<()>> {
        let envelope: ApiResponse<()> = self.api.delete(&format!("Status/Delete/{}", id)).await?;
        Ok(envelope.into())
    }
}
