use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Complaint joined with its category, status and submitter names
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub category_name: String,
    pub status_id: Option<Uuid>,
    pub status_name: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub media_url: Option<String>,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
}
