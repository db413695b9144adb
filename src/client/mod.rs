//! Async client SDK for the complaint API.
//!
//! [`Client`] bundles the per-resource services over one shared
//! [`ApiClient`] and [`TokenStore`]:
//!
//! ```no_run
//! # async fn demo() -> complaint_desk::client::Result<()> {
//! use complaint_desk::client::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::from_env().unwrap_or_default())?;
//! client.auth.login("rina@example.com", "secret-password").await?;
//! let mine = client.complaints.list_mine().await?;
//! println!("{} complaints", mine.data.unwrap_or_default().len());
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod config;
pub mod error;
pub mod services;
pub mod token_store;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;
use std::sync::Arc;

pub use api_client::{ApiClient, SessionExpiredHook};
pub use config::ClientConfig;
pub use error::{ClientError, Result, StoreError};
pub use services::{
    AuthService, CategoryService, ComplaintService, ComplaintSubmission, ImageFile,
    ServiceResult, StatusService, UserService,
};
pub use token_store::{FileStore, KeyValueStore, MemoryStore, TokenState, TokenStore};

pub struct Client {
    api: Arc<ApiClient>,
    pub auth: AuthService,
    pub complaints: ComplaintService,
    pub categories: CategoryService,
    pub statuses: StatusService,
    pub users: UserService,
}

impl Client {
    /// Client with an in-memory session
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Client whose session survives restarts in a JSON file
    pub fn with_file_store(config: ClientConfig, path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_store(config, Arc::new(FileStore::new(path)))
    }

    pub fn with_store(config: ClientConfig, backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let tokens = Arc::new(TokenStore::new(
            backend,
            config.checksum_tokens,
            config.token_max_age,
        ));
        let api = Arc::new(ApiClient::new(&config, tokens)?);
        Ok(Self::from_api(api))
    }

    pub fn from_api(api: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            complaints: ComplaintService::new(api.clone()),
            categories: CategoryService::new(api.clone()),
            statuses: StatusService::new(api.clone()),
            users: UserService::new(api.clone()),
            api,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.api.tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;
    use crate::features::auth::policy::{Access, Permission, Requirement};
    use axum::{routing::{get, post}, Json, Router};
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_user_session_end_to_end() {
        let backend = FakeBackend::start(
            Router::new()
                .route(
                    "/api/User/Login",
                    post(|| async {
                        Json(json!({
                            "status": true,
                            "message": "Login successful",
                            "data": {
                                "token": "h.p.s",
                                "user": {"id": Uuid::from_u128(2), "fullName": "Rina", "email": "rina@example.com", "role": 0}
                            }
                        }))
                    }),
                )
                .route(
                    "/api/Complaint/GetAllUserComplaints",
                    get(|| async { Json(json!({"status": false, "message": "Not found!", "data": null})) }),
                ),
        )
        .await;
        let client = backend.client();

        client.auth.login("rina@example.com", "secret-password").await.unwrap();

        assert_eq!(
            client.auth.check_access(Requirement::Permission(Permission::DeleteCategory)),
            Access::Denied
        );
        assert!(client.auth.permissions().can_create_complaint);

        let mine = client.complaints.list_mine().await.unwrap();
        assert!(mine.success);
        assert!(mine.data.unwrap().is_empty());
        assert!(client.tokens().has_token());
    }
}
