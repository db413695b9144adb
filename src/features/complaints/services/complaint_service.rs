use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::dtos::{ComplaintResponseDto, DirectionsResponseDto};
use crate::features::complaints::location::{self, Coordinates, Platform};
use crate::features::complaints::media;
use crate::features::complaints::models::ComplaintRow;
use crate::features::complaints::workflow::{self, StatusKind, Transition};
use crate::features::statuses::StatusService;
use crate::modules::storage::MediaStore;
use crate::shared::constants::UNKNOWN_NAME;

// Category and status fall back to "Unknown" once their row is gone
const SELECT_COMPLAINTS: &str = r#"
    SELECT c.id, c.title, c.description,
           c.category_id, COALESCE(cat.name, $1) AS category_name,
           c.status_id, COALESCE(s.name, $1) AS status_name,
           c.user_id, u.full_name AS user_name, u.email AS user_email,
           c.latitude, c.longitude, c.media_url, c.created_on, c.last_modified_on
    FROM complaints c
    JOIN users u ON u.id = c.user_id
    LEFT JOIN categories cat ON cat.id = c.category_id
    LEFT JOIN statuses s ON s.id = c.status_id
"#;

/// Photo attached to a submission
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Validated submission input
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub coordinates: Option<Coordinates>,
    pub media: Option<MediaUpload>,
}

/// Service for complaint operations
pub struct ComplaintService {
    pool: PgPool,
    statuses: Arc<StatusService>,
    media_store: Arc<dyn MediaStore>,
}

impl ComplaintService {
    pub fn new(pool: PgPool, statuses: Arc<StatusService>, media_store: Arc<dyn MediaStore>) -> Self {
        Self {
            pool,
            statuses,
            media_store,
        }
    }

    /// Every complaint, newest first
    pub async fn list_all(&self) -> Result<Vec<ComplaintResponseDto>> {
        let sql = format!("{} ORDER BY c.created_on DESC", SELECT_COMPLAINTS);
        let rows = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(UNKNOWN_NAME)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list complaints: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Complaints filed by one user, newest first; empty is not an error
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ComplaintResponseDto>> {
        let sql = format!(
            "{} WHERE c.user_id = $2 ORDER BY c.created_on DESC",
            SELECT_COMPLAINTS
        );
        let rows = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(UNKNOWN_NAME)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list complaints for user {}: {:?}", user_id, e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find(&self, id: Uuid) -> Result<ComplaintResponseDto> {
        let sql = format!("{} WHERE c.id = $2", SELECT_COMPLAINTS);
        sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(UNKNOWN_NAME)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|r| r.into())
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))
    }

    /// One complaint, visible to its submitter and to admins
    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ComplaintResponseDto> {
        let complaint = self.find(id).await?;
        if !user.can_access_owned(complaint.user_id) {
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }
        Ok(complaint)
    }

    /// Create a complaint in the default status, uploading its photo first
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        complaint: NewComplaint,
    ) -> Result<ComplaintResponseDto> {
        let media = match complaint.media {
            Some(upload) => {
                let extension = media::validate_image(&upload.content_type, upload.data.len())
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                Some((extension, upload))
            }
            None => None,
        };

        let status_id = match self.statuses.default_status().await? {
            Some(status) => Some(status.id),
            None => {
                tracing::warn!("No statuses defined; new complaint will show as Unknown");
                None
            }
        };

        let uploaded = match media {
            Some((extension, upload)) => {
                let key = self.media_store.complaint_key(user.user_id, extension);
                let url = self
                    .media_store
                    .put(&key, upload.data, &upload.content_type)
                    .await?;
                Some((key, url))
            }
            None => None,
        };

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO complaints (title, description, category_id, status_id, user_id, latitude, longitude, media_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(complaint.title.trim())
        .bind(complaint.description.trim())
        .bind(complaint.category_id)
        .bind(status_id)
        .bind(user.user_id)
        .bind(complaint.coordinates.map(|c| c.latitude))
        .bind(complaint.coordinates.map(|c| c.longitude))
        .bind(uploaded.as_ref().map(|(_, url)| url.as_str()))
        .fetch_one(&self.pool)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                if let Some((key, _)) = &uploaded {
                    if let Err(cleanup) = self.media_store.remove(key).await {
                        tracing::warn!("Failed to remove orphaned upload {}: {}", key, cleanup);
                    }
                }
                return Err(match e {
                    sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                        AppError::BadRequest("Category not found".to_string())
                    }
                    other => {
                        tracing::error!("Failed to insert complaint: {:?}", other);
                        AppError::Database(other)
                    }
                });
            }
        };

        tracing::info!("User {} submitted complaint {}", user.user_id, id);
        self.find(id).await
    }

    /// Move a complaint to any status; the transition is logged, never refused
    pub async fn update_status(&self, id: Uuid, status_id: Uuid) -> Result<ComplaintResponseDto> {
        let target = self
            .statuses
            .find(status_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Status not found".to_string()))?;
        let current = self.find(id).await?;

        let from = current.status();
        let to = StatusKind::from_name(&target.name);
        match workflow::classify(&from, &to) {
            Transition::QuickAction(action) => {
                tracing::info!("Complaint {}: {} ({} -> {})", id, action.label(), from, to)
            }
            Transition::Override => {
                tracing::info!("Complaint {}: status override {} -> {}", id, from, to)
            }
            Transition::NoChange => tracing::debug!("Complaint {} already {}", id, to),
        }

        sqlx::query("UPDATE complaints SET status_id = $2, last_modified_on = NOW() WHERE id = $1")
            .bind(id)
            .bind(target.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status of complaint {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        self.find(id).await
    }

    /// Deep link to the complaint's location for the caller's platform
    pub async fn directions(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        platform: Platform,
    ) -> Result<DirectionsResponseDto> {
        let complaint = self.get(user, id).await?;
        let coordinates = complaint
            .coordinates()
            .ok_or_else(|| AppError::BadRequest("Complaint has no location".to_string()))?;

        Ok(DirectionsResponseDto {
            url: location::directions_url(&coordinates, platform),
            platform: platform.as_str().to_string(),
            latitude: coordinates.latitude.to_string(),
            longitude: coordinates.longitude.to_string(),
        })
    }
}
