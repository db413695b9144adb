use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for status
#[derive(Debug, Clone, FromRow)]
pub struct Status {
    pub id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
}
