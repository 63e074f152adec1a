use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// What a donation consists of. The unit of `amount` depends on the type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    JsonSchema,
    sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "donation_type", rename_all = "lowercase")]
pub enum DonationType {
    Money,
    Food,
    Supplies,
    Volunteers,
}

impl DonationType {
    pub const ALL: [DonationType; 4] = [
        DonationType::Money,
        DonationType::Food,
        DonationType::Supplies,
        DonationType::Volunteers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationType::Money => "money",
            DonationType::Food => "food",
            DonationType::Supplies => "supplies",
            DonationType::Volunteers => "volunteers",
        }
    }
}

/// Immutable once created
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: String,
    pub region_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub donation_type: DonationType,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
