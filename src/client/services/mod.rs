//! Typed wrappers over the REST endpoints.
//!
//! Each call yields `Result<ServiceResult<T>, ClientError>`: transport and
//! HTTP failures are errors, while a 2xx envelope with `status: false` is a
//! successful call carrying `success == false` and the server's message.

mod auth_service;
mod category_service;
mod complaint_service;
mod status_service;
mod user_service;

pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use complaint_service::{ComplaintService, ComplaintSubmission, ImageFile};
pub use status_service::StatusService;
pub use user_service::UserService;

use serde::Serialize;
use validator::ValidationErrors;

use super::error::ClientError;
use crate::shared::types::ApiResponse;

/// `{status, message, data}` normalized to `{success, message, data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResult<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ServiceResult<T> {
    pub fn from_envelope(envelope: ApiResponse<T>) -> Self {
        Self {
            success: envelope.status,
            message: envelope.message,
            data: envelope.data,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Data of a successful call
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

impl<T> From<ApiResponse<T>> for ServiceResult<T> {
    fn from(envelope: ApiResponse<T>) -> Self {
        Self::from_envelope(envelope)
    }
}

fn invalid(errors: ValidationErrors) -> ClientError {
    ClientError::Validation(errors.to_string())
}
