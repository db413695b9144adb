use thiserror::Error;

/// Failures of the persistent key-value store behind [`super::TokenStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `message` is taken from the error envelope when present
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
