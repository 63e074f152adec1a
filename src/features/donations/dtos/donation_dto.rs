use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::donations::models::{Donation, DonationType, DonorTotal};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::User;

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateDonationDto {
    pub region_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub donation_type: DonationType,
    /// Must be positive. Unit depends on the donation type.
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than zero"))]
    pub amount: f64,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponseDto {
    pub id: Uuid,
    pub user_id: String,
    pub region_id: Uuid,
    pub organization_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Donation> for DonationResponseDto {
    fn from(d: Donation) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            region_id: d.region_id,
            organization_id: d.organization_id,
            donation_type: d.donation_type,
            amount: d.amount,
            description: d.description,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TopDonorsQuery {
    /// Maximum number of donors (default 5)
    #[param(minimum = 1, maximum = 100, example = 5)]
    pub limit: Option<usize>,
}

/// Inclusive creation-time window
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// RFC 3339 timestamp
    #[param(example = "2025-01-01T00:00:00Z")]
    pub start: DateTime<Utc>,
    /// RFC 3339 timestamp
    #[param(example = "2025-12-31T23:59:59Z")]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecentDonationsQuery {
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub num_items: Option<usize>,
    /// Continuation cursor from the previous page
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopDonorDto {
    pub user_id: String,
    pub total_amount: f64,
    pub donation_count: usize,
    /// Absent when the donor has no user record
    pub user: Option<UserResponseDto>,
}

/// Pair ranked donors with their display records, keeping rank order.
/// A donor missing from `users` gets `user: None`.
pub fn attach_users(ranked: Vec<DonorTotal>, mut users: HashMap<String, User>) -> Vec<TopDonorDto> {
    ranked
        .into_iter()
        .map(|donor| TopDonorDto {
            user: users.remove(&donor.user_id).map(Into::into),
            user_id: donor.user_id,
            total_amount: donor.total_amount,
            donation_count: donor.donation_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(amount: f64, description: Option<String>) -> CreateDonationDto {
        CreateDonationDto {
            region_id: Uuid::now_v7(),
            organization_id: None,
            donation_type: DonationType::Money,
            amount,
            description,
        }
    }

    #[test]
    fn test_positive_amount_passes() {
        assert!(dto(25.0, Some("For shelter kits".to_string())).validate().is_ok());
    }

    #[test]
    fn test_zero_and_negative_amounts_fail() {
        assert!(dto(0.0, None).validate().is_err());
        assert!(dto(-10.0, None).validate().is_err());
    }

    #[test]
    fn test_long_description_fails() {
        assert!(dto(1.0, Some("x".repeat(2001))).validate().is_err());
    }

    #[test]
    fn test_create_payload_parses_lowercase_type() {
        let json = serde_json::json!({
            "region_id": "0190a000-0000-7000-8000-000000000001",
            "donation_type": "food",
            "amount": 12.5
        });

        let parsed: CreateDonationDto = serde_json::from_value(json).unwrap();

        assert_eq!(parsed.donation_type, DonationType::Food);
        assert!(parsed.organization_id.is_none());
    }

    fn donor(user_id: &str, total_amount: f64) -> DonorTotal {
        DonorTotal {
            user_id: user_id.to_string(),
            total_amount,
            donation_count: 1,
        }
    }

    fn user(id: &str, name: &str) -> User {
        let now = Utc::now();
        User {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_attach_users_keeps_donor_without_record() {
        let ranked = vec![donor("amy", 300.0), donor("ghost", 200.0), donor("zed", 100.0)];
        let users = HashMap::from([
            ("amy".to_string(), user("amy", "Amy")),
            ("zed".to_string(), user("zed", "Zed")),
        ]);

        let top = attach_users(ranked, users);

        let ids: Vec<&str> = top.iter().map(|d| d.user_id.as_str()).collect();
        assert_eq!(ids, vec!["amy", "ghost", "zed"]);
        assert_eq!(top[0].user.as_ref().and_then(|u| u.name.as_deref()), Some("Amy"));
        assert!(top[1].user.is_none());
        assert_eq!(top[2].user.as_ref().and_then(|u| u.name.as_deref()), Some("Zed"));

        let json = serde_json::to_value(&top).unwrap();
        assert!(json[1]["user"].is_null());
        assert_eq!(json[1]["totalAmount"], 200.0);
        assert_eq!(json[2]["user"]["id"], "zed");
    }

    #[test]
    fn test_attach_users_without_any_records() {
        let top = attach_users(vec![donor("u1", 5.0)], HashMap::new());

        assert_eq!(top.len(), 1);
        assert!(top[0].user.is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = serde_json::json!({
            "region_id": "0190a000-0000-7000-8000-000000000001",
            "donation_type": "crypto",
            "amount": 1.0
        });

        assert!(serde_json::from_value::<CreateDonationDto>(json).is_err());
    }
}
