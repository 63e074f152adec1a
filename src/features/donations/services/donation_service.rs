use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::donations::dtos::{attach_users, CreateDonationDto, TopDonorDto};
use crate::features::donations::models::{rank_donors, Donation, DonationTotals};
use crate::features::organizations::OrganizationService;
use crate::features::regions::RegionService;
use crate::features::users::UserService;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::listing::{self, Page, PageRequest};

const DONATION_COLUMNS: &str = r#"
    id, user_id, region_id, organization_id, donation_type,
    amount, description, created_at
"#;

pub struct DonationService {
    pool: PgPool,
    regions: Arc<RegionService>,
    organizations: Arc<OrganizationService>,
    users: Arc<UserService>,
}

impl DonationService {
    pub fn new(
        pool: PgPool,
        regions: Arc<RegionService>,
        organizations: Arc<OrganizationService>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            pool,
            regions,
            organizations,
            users,
        }
    }

    /// A user's donations, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(&format!(
            "SELECT {} FROM donations WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            DONATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch donations for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }

    async fn fetch_by_region(&self, region_id: Uuid) -> Result<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(&format!(
            "SELECT {} FROM donations WHERE region_id = $1 ORDER BY created_at DESC, id DESC",
            DONATION_COLUMNS
        ))
        .bind(region_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch donations for region {}: {:?}", region_id, e);
            AppError::Database(e)
        })
    }

    /// Donations to a region, newest first. NotFound if the region is unknown.
    pub async fn list_by_region(&self, region_id: Uuid) -> Result<Vec<Donation>> {
        self.regions.get(region_id).await?;
        self.fetch_by_region(region_id).await
    }

    pub async fn region_stats(&self, region_id: Uuid) -> Result<DonationTotals> {
        let donations = self.list_by_region(region_id).await?;
        Ok(DonationTotals::from_donations(&donations))
    }

    /// Largest donors to a region. Donors without a user record keep their
    /// entry with `user: None`.
    pub async fn top_donors(&self, region_id: Uuid, limit: usize) -> Result<Vec<TopDonorDto>> {
        let donations = self.list_by_region(region_id).await?;
        let ranked = rank_donors(&donations, region_id, limit.min(MAX_PAGE_SIZE));

        let ids: Vec<String> = ranked.iter().map(|d| d.user_id.clone()).collect();
        let users = self.users.find_by_ids(&ids).await?;

        Ok(attach_users(ranked, users))
    }

    /// Totals for donations created within `[start, end]`
    pub async fn stats_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DonationTotals> {
        if start > end {
            return Err(AppError::BadRequest(
                "start must not be after end".to_string(),
            ));
        }

        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {} FROM donations WHERE created_at >= $1 AND created_at <= $2",
            DONATION_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch donations by date range: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DonationTotals::within(&donations, start, end))
    }

    /// All donations, newest first, one page at a time
    pub async fn recent(&self, request: &PageRequest) -> Result<Page<Donation>> {
        request.offset()?;

        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {} FROM donations ORDER BY created_at DESC, id DESC",
            DONATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch recent donations: {:?}", e);
            AppError::Database(e)
        })?;

        listing::paginate(donations, request)
    }

    /// Record a donation from `donor`.
    ///
    /// The region and optional organization must exist. The donor's user
    /// record is refreshed first so they resolve in donor rankings.
    pub async fn create(&self, donor: &AuthenticatedUser, dto: CreateDonationDto) -> Result<Donation> {
        self.regions.get(dto.region_id).await?;
        if let Some(organization_id) = dto.organization_id {
            self.organizations.get(organization_id).await?;
        }

        self.users.upsert(donor).await?;

        let donation = sqlx::query_as::<_, Donation>(&format!(
            r#"
            INSERT INTO donations (id, user_id, region_id, organization_id, donation_type, amount, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            DONATION_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&donor.user_id)
        .bind(dto.region_id)
        .bind(dto.organization_id)
        .bind(dto.donation_type)
        .bind(dto.amount)
        .bind(dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create donation: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Donation {} of {} {} to region {} by {}",
            donation.id,
            donation.amount,
            donation.donation_type.as_str(),
            donation.region_id,
            donation.user_id
        );
        Ok(donation)
    }
}
