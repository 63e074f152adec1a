use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::donations::models::{DonationTotals, DonationType};
use crate::shared::listing::{FieldValue, Listable};

/// Aid organization. Created unverified; only the verification operation flips `verified`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
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

impl Organization {
    pub fn operates_in(&self, region_id: Uuid) -> bool {
        self.region_ids.contains(&region_id)
    }
}

impl Listable for Organization {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(Cow::Borrowed(&self.name))),
            "description" => Some(FieldValue::Text(Cow::Borrowed(&self.description))),
            "verified" => Some(FieldValue::Bool(self.verified)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct TypeTotal {
    pub count: usize,
    pub amount: f64,
}

/// Donation figures for one organization
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationStats {
    pub total_donations: usize,
    pub total_amount: f64,
    pub by_type: BTreeMap<DonationType, TypeTotal>,
    pub regions_served: usize,
    pub verified: bool,
}

impl OrganizationStats {
    pub fn new(organization: &Organization, totals: &DonationTotals) -> Self {
        let by_type = totals
            .count_by_type
            .iter()
            .map(|(kind, count)| {
                let amount = totals.by_type.get(kind).copied().unwrap_or_default();
                (*kind, TypeTotal { count: *count, amount })
            })
            .collect();

        Self {
            total_donations: totals.total_donations,
            total_amount: totals.total_amount,
            by_type,
            regions_served: organization.region_ids.len(),
            verified: organization.verified,
        }
    }
}
