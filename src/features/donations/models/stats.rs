//! Pure reducers over fetched donations.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Donation, DonationType};

/// Per-type and overall donation totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationTotals {
    pub total_amount: f64,
    pub total_donations: usize,
    /// Summed amount per donation type; types without donations are absent
    pub by_type: BTreeMap<DonationType, f64>,
    pub count_by_type: BTreeMap<DonationType, usize>,
}

impl DonationTotals {
    pub fn from_donations<'a>(donations: impl IntoIterator<Item = &'a Donation>) -> Self {
        donations.into_iter().fold(Self::default(), |mut totals, d| {
            totals.total_amount += d.amount;
            totals.total_donations += 1;
            *totals.by_type.entry(d.donation_type).or_insert(0.0) += d.amount;
            *totals.count_by_type.entry(d.donation_type).or_insert(0) += 1;
            totals
        })
    }

    /// Totals over donations created within `[start, end]`, both ends included
    pub fn within<'a>(
        donations: impl IntoIterator<Item = &'a Donation>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self::from_donations(
            donations
                .into_iter()
                .filter(|d| d.created_at >= start && d.created_at <= end),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonorTotal {
    pub user_id: String,
    pub total_amount: f64,
    pub donation_count: usize,
}

/// Sum donations to `region_id` per user and keep the `limit` largest.
///
/// Ties on the total are broken by user id so the ranking is repeatable.
pub fn rank_donors(donations: &[Donation], region_id: Uuid, limit: usize) -> Vec<DonorTotal> {
    let mut per_user: HashMap<&str, DonorTotal> = HashMap::new();

    for d in donations.iter().filter(|d| d.region_id == region_id) {
        let entry = per_user.entry(d.user_id.as_str()).or_insert_with(|| DonorTotal {
            user_id: d.user_id.clone(),
            total_amount: 0.0,
            donation_count: 0,
        });
        entry.total_amount += d.amount;
        entry.donation_count += 1;
    }

    let mut ranked: Vec<DonorTotal> = per_user.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn donation(user: &str, region: Uuid, kind: DonationType, amount: f64) -> Donation {
        Donation {
            id: Uuid::now_v7(),
            user_id: user.to_string(),
            region_id: region,
            organization_id: None,
            donation_type: kind,
            amount,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_by_type() {
        let region = Uuid::now_v7();
        let donations = vec![
            donation("u1", region, DonationType::Money, 100.0),
            donation("u2", region, DonationType::Food, 5.0),
            donation("u1", region, DonationType::Money, 50.0),
        ];

        let totals = DonationTotals::from_donations(&donations);

        assert_eq!(totals.total_amount, 155.0);
        assert_eq!(totals.total_donations, 3);
        assert_eq!(totals.by_type.get(&DonationType::Money), Some(&150.0));
        assert_eq!(totals.by_type.get(&DonationType::Food), Some(&5.0));
        assert!(!totals.by_type.contains_key(&DonationType::Supplies));
        assert_eq!(totals.count_by_type.get(&DonationType::Money), Some(&2));
    }

    #[test]
    fn test_totals_are_consistent() {
        let region = Uuid::now_v7();
        let donations: Vec<Donation> = (0..40)
            .map(|i| {
                donation(
                    &format!("u{}", i % 7),
                    region,
                    DonationType::ALL[i % 4],
                    (i * 13 % 29) as f64,
                )
            })
            .collect();

        let totals = DonationTotals::from_donations(&donations);

        let by_type_sum: f64 = totals.by_type.values().sum();
        let count_sum: usize = totals.count_by_type.values().sum();
        assert!((by_type_sum - totals.total_amount).abs() < 1e-9);
        assert_eq!(count_sum, donations.len());
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = DonationTotals::from_donations(&[]);

        assert_eq!(totals.total_amount, 0.0);
        assert_eq!(totals.total_donations, 0);
        assert!(totals.by_type.is_empty());
        assert!(totals.count_by_type.is_empty());
    }

    #[test]
    fn test_totals_serialize_type_keys_lowercase() {
        let region = Uuid::now_v7();
        let totals =
            DonationTotals::from_donations(&[donation("u1", region, DonationType::Supplies, 3.0)]);

        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(json["byType"]["supplies"], 3.0);
        assert_eq!(json["countByType"]["supplies"], 1);
        assert_eq!(json["totalDonations"], 1);
    }

    fn stamped(kind: DonationType, amount: f64, at: DateTime<Utc>) -> Donation {
        Donation {
            created_at: at,
            ..donation("u1", Uuid::now_v7(), kind, amount)
        }
    }

    #[test]
    fn test_within_includes_both_ends() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap();
        let ms = Duration::milliseconds(1);
        let donations = vec![
            stamped(DonationType::Money, 1000.0, start - ms),
            stamped(DonationType::Money, 40.0, start),
            stamped(DonationType::Food, 7.0, end),
            stamped(DonationType::Food, 500.0, end + ms),
        ];

        let totals = DonationTotals::within(&donations, start, end);

        assert_eq!(totals.total_donations, 2);
        assert_eq!(totals.total_amount, 47.0);
        assert_eq!(totals.by_type.get(&DonationType::Money), Some(&40.0));
        assert_eq!(totals.by_type.get(&DonationType::Food), Some(&7.0));
        assert_eq!(totals.count_by_type.get(&DonationType::Money), Some(&1));
        assert_eq!(totals.count_by_type.get(&DonationType::Food), Some(&1));
    }

    #[test]
    fn test_within_single_instant_window() {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let donations = vec![stamped(DonationType::Supplies, 3.0, at)];

        assert_eq!(DonationTotals::within(&donations, at, at).total_donations, 1);
    }

    #[test]
    fn test_rank_donors_orders_and_limits() {
        let region = Uuid::now_v7();
        let other = Uuid::now_v7();
        let donations = vec![
            donation("alice", region, DonationType::Money, 30.0),
            donation("bob", region, DonationType::Money, 100.0),
            donation("alice", region, DonationType::Food, 80.0),
            donation("carol", region, DonationType::Money, 10.0),
            donation("dave", other, DonationType::Money, 1000.0),
        ];

        let ranked = rank_donors(&donations, region, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user_id, "alice");
        assert_eq!(ranked[0].total_amount, 110.0);
        assert_eq!(ranked[0].donation_count, 2);
        assert_eq!(ranked[1].user_id, "bob");
    }

    #[test]
    fn test_rank_donors_totals_match_recomputed_sums() {
        let region = Uuid::now_v7();
        let donations: Vec<Donation> = (0..50)
            .map(|i| donation(&format!("u{}", i % 9), region, DonationType::Money, (i % 11) as f64))
            .collect();

        let ranked = rank_donors(&donations, region, 5);

        assert!(ranked.len() <= 5);
        assert!(ranked.windows(2).all(|w| w[0].total_amount >= w[1].total_amount));
        for entry in &ranked {
            let expected: f64 = donations
                .iter()
                .filter(|d| d.user_id == entry.user_id)
                .map(|d| d.amount)
                .sum();
            assert_eq!(entry.total_amount, expected);
        }
    }

    #[test]
    fn test_rank_donors_breaks_ties_by_user_id() {
        let region = Uuid::now_v7();
        let donations = vec![
            donation("zed", region, DonationType::Money, 20.0),
            donation("amy", region, DonationType::Money, 20.0),
        ];

        let ranked = rank_donors(&donations, region, 5);

        let ids: Vec<&str> = ranked.iter().map(|d| d.user_id.as_str()).collect();
        assert_eq!(ids, vec!["amy", "zed"]);
    }

    #[test]
    fn test_rank_donors_without_region_donations_is_empty() {
        let donations = vec![donation("u1", Uuid::now_v7(), DonationType::Money, 5.0)];

        assert!(rank_donors(&donations, Uuid::now_v7(), 5).is_empty());
    }
}
