use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};
use uuid::Uuid;

use super::ServiceResult;
use crate::client::api_client::ApiClient;
use crate::client::error::{ClientError, Result};
use crate::features::complaints::dtos::{
    ComplaintResponseDto, DirectionsResponseDto, UpdateComplaintStatusDto,
};
use crate::features::complaints::location::Coordinates;
use crate::features::complaints::media::validate_image;
use crate::features::complaints::workflow::OptimisticUpdate;
use crate::features::statuses::dtos::StatusResponseDto;
use crate::shared::constants::MAX_TITLE_LENGTH;
use crate::shared::types::ApiResponse;

/// Legacy backends answer a user with no complaints with this message
const NOT_FOUND_SENTINEL: &str = "Not found!";

/// Photo chosen for a new complaint
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Form values for a new complaint, as entered
#[derive(Debug, Clone, Default)]
pub struct ComplaintSubmission {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub image: Option<ImageFile>,
}

impl ComplaintSubmission {
    fn check(&self) -> Result<()> {
        let required = [
            (&self.title, "Title is required"),
            (&self.description, "Description is required"),
            (&self.category_id, "Category is required"),
        ];
        if let Some((_, message)) = required.iter().find(|(v, _)| v.trim().is_empty()) {
            return Err(ClientError::Validation(message.to_string()));
        }
        if self.title.trim().chars().count() > MAX_TITLE_LENGTH {
            return Err(ClientError::Validation(format!(
                "Title must not exceed {} characters",
                MAX_TITLE_LENGTH
            )));
        }

        Coordinates::parse(self.latitude.as_deref(), self.longitude.as_deref())
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        if let Some(image) = &self.image {
            validate_image(&image.content_type, image.data.len())
                .map_err(|e| ClientError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    fn into_form(self) -> Result<Form> {
        let mut form = Form::new()
            .text("title", self.title.trim().to_string())
            .text("description", self.description.trim().to_string())
            .text("categoryId", self.category_id.trim().to_string());

        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            if !lat.trim().is_empty() && !lng.trim().is_empty() {
                form = form
                    .text("latitude", lat.trim().to_string())
                    .text("longitude", lng.trim().to_string());
            }
        }

        // The endpoint requires a `file` part; zero bytes means no photo
        let part = match self.image {
            Some(image) => Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?,
            None => Part::bytes(Vec::new())
                .file_name("empty.txt")
                .mime_str("text/plain")?,
        };
        Ok(form.part("file", part))
    }
}

pub struct ComplaintService {
    api: Arc<ApiClient>,
}

impl ComplaintService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Every complaint (admin)
    pub async fn list_all(&self) -> Result<ServiceResult<Vec<ComplaintResponseDto>>> {
        let envelope: ApiResponse<Vec<ComplaintResponseDto>> =
            self.api.get("Complaint/GetAll").await?;
        Ok(envelope.into())
    }

    /// The signed-in user's complaints. "Not found!" reads as an empty list.
    pub async fn list_mine(&self) -> Result<ServiceResult<Vec<ComplaintResponseDto>>> {
        let response = self
            .api
            .get::<ApiResponse<Vec<ComplaintResponseDto>>>("Complaint/GetAllUserComplaints")
            .await;

        match response {
            Ok(envelope) if !envelope.status && is_not_found(&envelope.message) => {
                Ok(ServiceResult::ok(Vec::new(), envelope.message))
            }
            Ok(envelope) => {
                let mut result = ServiceResult::from_envelope(envelope);
                if result.success && result.data.is_none() {
                    result.data = Some(Vec::new());
                }
                Ok(result)
            }
            Err(ClientError::Http { status: 404, message }) if is_not_found(&message) => {
                debug!("No complaints yet for the current user");
                Ok(ServiceResult::ok(Vec::new(), message))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<ServiceResult<ComplaintResponseDto>> {
        let envelope: ApiResponse<ComplaintResponseDto> =
            self.api.get(&format!("Complaint/Get/{}", id)).await?;
        Ok(envelope.into())
    }

    /// A complaint and the status list, fetched concurrently
    pub async fn get_with_statuses(
        &self,
        id: Uuid,
    ) -> Result<(
        ServiceResult<ComplaintResponseDto>,
        ServiceResult<Vec<StatusResponseDto>>,
    )> {
        let path = format!("Complaint/Get/{}", id);
        let (complaint, statuses) = futures::try_join!(
            self.api.get::<ApiResponse<ComplaintResponseDto>>(&path),
            self.api.get::<ApiResponse<Vec<StatusResponseDto>>>("Status/GetAll"),
        )?;

        let mut statuses = ServiceResult::from_envelope(statuses);
        if let Some(list) = statuses.data.as_mut() {
            list.sort_by_key(|s| s.position);
        }
        Ok((complaint.into(), statuses))
    }

    /// Checked locally, then sent as multipart form data
    pub async fn submit(
        &self,
        submission: ComplaintSubmission,
    ) -> Result<ServiceResult<ComplaintResponseDto>> {
        submission.check()?;
        let has_photo = submission.image.is_some();

        let envelope: ApiResponse<ComplaintResponseDto> = self
            .api
            .post_multipart("Complaint/Submit", submission.into_form()?)
            .await?;

        let result = ServiceResult::from_envelope(envelope);
        if result.success {
            info!("Complaint submitted (photo: {})", has_photo);
        }
        Ok(result)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status_id: Uuid,
    ) -> Result<ServiceResult<ComplaintResponseDto>> {
        let envelope: ApiResponse<ComplaintResponseDto> = self
            .api
            .put(
                &format!("Complaint/UpdateStatus/{}", id),
                &UpdateComplaintStatusDto { status_id },
            )
            .await?;
        Ok(envelope.into())
    }

    /// Show the new status in `complaints` at once and restore the old one
    /// if the server refuses or the call fails. The failure is returned
    /// unchanged so its message can be surfaced.
    pub async fn update_status_optimistic(
        &self,
        complaints: &mut [ComplaintResponseDto],
        id: Uuid,
        status: &StatusResponseDto,
    ) -> Result<ServiceResult<ComplaintResponseDto>> {
        let receipt = OptimisticUpdate::apply(complaints, id, status.id, &status.name);

        let outcome = self.update_status(id, status.id).await;
        let confirmed = match &outcome {
            Ok(result) => result.success,
            Err(_) => false,
        };

        if !confirmed {
            if let Some(receipt) = receipt {
                debug!("Rolling back status of complaint {}", id);
                receipt.rollback(complaints);
            }
        } else if let Some(updated) = outcome.as_ref().ok().and_then(|r| r.data.as_ref()) {
            if let Some(local) = complaints.iter_mut().find(|c| c.id == id) {
                *local = updated.clone();
            }
        }
        outcome
    }

    pub async fn directions(&self, id: Uuid) -> Result<ServiceResult<DirectionsResponseDto>> {
        let envelope: ApiResponse<DirectionsResponseDto> =
            self.api.get(&format!("Complaint/Directions/{}", id)).await?;
        Ok(envelope.into())
    }
}

fn is_not_found(message: &str) -> bool {
    message.trim().eq_ignore_ascii_case(NOT_FOUND_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeBackend;
    use axum::{
        extract::{Multipart, Path},
        http::StatusCode,
        routing::{get, post, put},
        Json, Router,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    fn complaint_json(id: Uuid, status_id: Uuid, status_name: &str) -> Value {
        json!({
            "id": id,
            "title": "Broken streetlight",
            "description": "Dark since Monday",
            "categoryId": Uuid::from_u128(100),
            "categoryName": "Lighting",
            "statusId": status_id,
            "statusName": status_name,
            "userId": Uuid::from_u128(2),
            "userName": "Rina",
            "userEmail": "rina@example.com",
            "latitude": null,
            "longitude": null,
            "mediaUrl": null,
            "createdOn": Utc::now(),
            "lastModifiedOn": Utc::now()
        })
    }

    fn complaint(id: Uuid, status_id: Uuid, status_name: &str) -> ComplaintResponseDto {
        serde_json::from_value(complaint_json(id, status_id, status_name)).unwrap()
    }

    fn submission() -> ComplaintSubmission {
        ComplaintSubmission {
            title: "Pothole".to_string(),
            description: "Deep pothole near the school".to_string(),
            category_id: Uuid::from_u128(100).to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_not_found_404_is_empty_list() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Complaint/GetAllUserComplaints",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"status": false, "message": "Not found!", "data": null})),
                )
            }),
        ))
        .await;
        let complaints = ComplaintService::new(backend.api().clone());

        let result = complaints.list_mine().await.unwrap();

        assert!(result.success);
        assert_eq!(result.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_not_found_envelope_is_empty_list() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Complaint/GetAllUserComplaints",
            get(|| async { Json(json!({"status": false, "message": "Not found!", "data": null})) }),
        ))
        .await;
        let complaints = ComplaintService::new(backend.api().clone());

        let result = complaints.list_mine().await.unwrap();
        assert!(result.success);
        assert_eq!(result.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_other_failures_stay_errors() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Complaint/GetAllUserComplaints",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"status": false, "message": "Database error occurred", "data": null})),
                )
            }),
        ))
        .await;
        let complaints = ComplaintService::new(backend.api().clone());

        let err = complaints.list_mine().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Database error occurred");
    }

    #[tokio::test]
    async fn test_submit_without_photo_attaches_empty_file() {
        let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let backend = FakeBackend::start(Router::new().route(
            "/api/Complaint/Submit",
            post(move |mut multipart: Multipart| {
                let sink = sink.clone();
                async move {
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let len = field.bytes().await.unwrap().len();
                        sink.lock().unwrap().push((name, len));
                    }
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "status": true,
                            "message": "Complaint submitted successfully",
                            "data": complaint_json(Uuid::from_u128(1), Uuid::from_u128(10), "Pending")
                        })),
                    )
                }
            }),
        ))
        .await;
        let complaints = ComplaintService::new(backend.api().clone());

        let result = complaints.submit(submission()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.message, "Complaint submitted successfully");
        assert_eq!(result.data.unwrap().status_name, "Pending");

        let fields = seen.lock().unwrap().clone();
        assert!(fields.contains(&("file".to_string(), 0)));
        assert!(fields.iter().any(|(name, _)| name == "categoryId"));
        assert!(!fields.iter().any(|(name, _)| name == "latitude"));
    }

    #[tokio::test]
    async fn test_submit_rejects_locally() {
        let backend = FakeBackend::start(Router::new()).await;
        let complaints = ComplaintService::new(backend.api().clone());

        let mut blank_category = submission();
        blank_category.category_id = "  ".to_string();
        let err = complaints.submit(blank_category).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "Category is required"));

        let mut long_title = submission();
        long_title.title = format!("  {}  ", "t".repeat(MAX_TITLE_LENGTH + 1));
        let err = complaints.submit(long_title).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ref m) if m == "Title must not exceed 200 characters"
        ));

        let mut half_location = submission();
        half_location.latitude = Some("-6.2".to_string());
        let err = complaints.submit(half_location).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let mut big_photo = submission();
        big_photo.image = Some(ImageFile {
            file_name: "huge.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0; 10 * 1024 * 1024 + 1],
        });
        let err = complaints.submit(big_photo).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "Image must be 10MB or smaller"));

        let mut webp = submission();
        webp.image = Some(ImageFile {
            file_name: "photo.webp".to_string(),
            content_type: "image/webp".to_string(),
            data: vec![1, 2, 3],
        });
        assert!(complaints.submit(webp).await.is_err());
    }

    /// Fake backend that renames complaints to whichever status id arrives
    fn status_backend() -> Router {
        let names = [
            (Uuid::from_u128(10), "Pending"),
            (Uuid::from_u128(11), "In Progress"),
            (Uuid::from_u128(12), "Resolved"),
            (Uuid::from_u128(13), "Rejected"),
        ];
        Router::new().route(
            "/api/Complaint/UpdateStatus/{id}",
            put(move |Path(id): Path<Uuid>, Json(body): Json<Value>| async move {
                let status_id: Uuid = body["statusId"]
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default();
                match names.iter().find(|(sid, _)| *sid == status_id) {
                    Some((sid, name)) => (
                        StatusCode::OK,
                        Json(json!({
                            "status": true,
                            "message": "Status updated",
                            "data": complaint_json(id, *sid, name)
                        })),
                    ),
                    None => (
                        StatusCode::NOT_FOUND,
                        Json(json!({"status": false, "message": "Status not found", "data": null})),
                    ),
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_any_transition_displays_target_name() {
        let backend = FakeBackend::start(status_backend()).await;
        let complaints = ComplaintService::new(backend.api().clone());
        let id = Uuid::from_u128(1);
        let names = ["Pending", "In Progress", "Resolved", "Rejected"];

        for (from_idx, from) in names.iter().enumerate() {
            for (to_idx, to) in names.iter().enumerate() {
                let mut list = vec![complaint(id, Uuid::from_u128(10 + from_idx as u128), from)];
                let target = StatusResponseDto {
                    id: Uuid::from_u128(10 + to_idx as u128),
                    name: to.to_string(),
                    position: to_idx as i32,
                };

                let result = complaints
                    .update_status_optimistic(&mut list, id, &target)
                    .await
                    .unwrap();

                assert!(result.success, "{} -> {}", from, to);
                assert_eq!(list[0].status_name, *to, "{} -> {}", from, to);
                assert_eq!(result.data.unwrap().status_name, *to);
            }
        }
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back() {
        let backend = FakeBackend::start(status_backend()).await;
        let complaints = ComplaintService::new(backend.api().clone());
        let id = Uuid::from_u128(1);
        let mut list = vec![complaint(id, Uuid::from_u128(10), "Pending")];
        let unknown = StatusResponseDto {
            id: Uuid::from_u128(99),
            name: "Archived".to_string(),
            position: 9,
        };

        let err = complaints
            .update_status_optimistic(&mut list, id, &unknown)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Status not found");
        assert_eq!(list[0].status_name, "Pending");
        assert_eq!(list[0].status_id, Some(Uuid::from_u128(10)));
    }

    #[tokio::test]
    async fn test_get_with_statuses_runs_both_requests() {
        let id = Uuid::from_u128(5);
        let backend = FakeBackend::start(
            Router::new()
                .route(
                    "/api/Complaint/Get/{id}",
                    get(|Path(id): Path<Uuid>| async move {
                        Json(json!({
                            "status": true,
                            "message": "Success",
                            "data": complaint_json(id, Uuid::from_u128(10), "Pending")
                        }))
                    }),
                )
                .route(
                    "/api/Status/GetAll",
                    get(|| async {
                        Json(json!({
                            "status": true,
                            "message": "Success",
                            "data": [
                                {"id": Uuid::from_u128(12), "name": "Resolved", "position": 2},
                                {"id": Uuid::from_u128(10), "name": "Pending", "position": 0}
                            ]
                        }))
                    }),
                ),
        )
        .await;
        let complaints = ComplaintService::new(backend.api().clone());

        let (complaint, statuses) = complaints.get_with_statuses(id).await.unwrap();

        assert_eq!(complaint.data.unwrap().id, id);
        let names: Vec<_> = statuses.data.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Pending", "Resolved"]);
    }
}
