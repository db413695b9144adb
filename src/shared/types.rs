use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope used by every endpoint: `{status, message, data}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            status: true,
            message: message.unwrap_or_else(|| "Success".to_string()),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_defaults_message() {
        let response = ApiResponse::success(Some(3), None);
        assert!(response.status);
        assert_eq!(response.message, "Success");
        assert_eq!(response.data, Some(3));
    }

    #[test]
    fn test_error_serializes_null_data() {
        let value = serde_json::to_value(ApiResponse::<()>::error("Not found!")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": false, "message": "Not found!", "data": null})
        );
    }

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let parsed: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"status": true}"#).unwrap();
        assert!(parsed.status);
        assert!(parsed.message.is_empty());
        assert!(parsed.data.is_none());
    }
}
