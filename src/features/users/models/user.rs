use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Display record for a caller, keyed by token subject
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
