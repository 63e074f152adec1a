use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::organizations::models::Organization;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct OrganizationListQuery {
    /// Only return verified organizations
    #[serde(default)]
    pub verified_only: bool,
    /// Case-insensitive match on the organization name
    pub search: Option<String>,
}

/// New organization payload.
///
/// Historical field names (`NGO_Name`, `Mission_Statement`, `Regions`,
/// `Email` and the capitalized capacity metrics) are accepted as aliases.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateOrganizationDto {
    #[serde(alias = "NGO_Name")]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default, alias = "Mission_Statement")]
    pub description: String,
    #[serde(alias = "Regions")]
    #[validate(length(min = 1, message = "At least one region is required"))]
    pub region_ids: Vec<Uuid>,
    #[serde(alias = "Email")]
    #[validate(email)]
    pub contact_email: String,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default, alias = "Volunteers_Available")]
    #[validate(range(min = 0))]
    pub volunteers_available: i64,
    #[serde(default, alias = "Shelter_Capacity")]
    #[validate(range(min = 0))]
    pub shelter_capacity: i64,
    #[serde(default, alias = "Food_Stock_Tons")]
    #[validate(range(min = 0.0))]
    pub food_stock_tons: f64,
    #[serde(default, alias = "Water_Stock_Liters")]
    #[validate(range(min = 0.0))]
    pub water_stock_liters: f64,
    #[serde(default, alias = "Medical_Supply_Units")]
    #[validate(range(min = 0))]
    pub medical_supply_units: i64,
    #[serde(default, alias = "Transport_Vehicles")]
    #[validate(range(min = 0))]
    pub transport_vehicles: i64,
    #[serde(default, alias = "Emergency_Fund_USD")]
    #[validate(range(min = 0.0))]
    pub emergency_fund_usd: f64,
    #[serde(default, alias = "Field_Hospitals_Setup")]
    #[validate(range(min = 0))]
    pub field_hospitals: i64,
}

/// Keeps an explicit `null` apart from an absent field
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update. Verification is not editable here.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateOrganizationDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "At least one region is required"))]
    pub region_ids: Option<Vec<Uuid>>,
    /// Absent keeps the stored website, `null` clears it
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    #[validate(url)]
    pub website: Option<Option<String>>,
    #[validate(email)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerificationDto {
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub region_ids: Vec<Uuid>,
    pub contact_email: String,
    pub website: Option<String>,
    pub verified: bool,
    pub volunteers_available: i64,
    pub shelter_capacity: i64,
    pub food_stock_tons: f64,
    pub water_stock_liters: f64,
    pub medical_supply_units: i64,
    pub transport_vehicles: i64,
    pub emergency_fund_usd: f64,
    pub field_hospitals: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponseDto {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            description: o.description,
            region_ids: o.region_ids,
            contact_email: o.contact_email,
            website: o.website,
            verified: o.verified,
            volunteers_available: o.volunteers_available,
            shelter_capacity: o.shelter_capacity,
            food_stock_tons: o.food_stock_tons,
            water_stock_liters: o.water_stock_liters,
            medical_supply_units: o.medical_supply_units,
            transport_vehicles: o.transport_vehicles,
            emergency_fund_usd: o.emergency_fund_usd,
            field_hospitals: o.field_hospitals,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
