use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::donations::models::{Donation, DonationTotals};
use crate::features::organizations::dtos::{CreateOrganizationDto, UpdateOrganizationDto};
use crate::features::organizations::models::{Organization, OrganizationStats};
use crate::features::regions::RegionService;
use crate::shared::listing::{self, FieldFilter, FilterValue, ListQuery, SearchFilter};

const ORGANIZATION_COLUMNS: &str = r#"
    id, name, description, region_ids, contact_email, website, verified,
    volunteers_available, shelter_capacity, food_stock_tons, water_stock_liters,
    medical_supply_units, transport_vehicles, emergency_fund_usd, field_hospitals,
    created_at, updated_at
"#;

pub struct OrganizationService {
    pool: PgPool,
    regions: Arc<RegionService>,
}

impl OrganizationService {
    pub fn new(pool: PgPool, regions: Arc<RegionService>) -> Self {
        Self { pool, regions }
    }

    async fn fetch_all(&self) -> Result<Vec<Organization>> {
        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations ORDER BY name ASC, id ASC",
            ORGANIZATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch organizations: {:?}", e);
            AppError::Database(e)
        })
    }

    /// List organizations by name, optionally verified-only and narrowed by a name search
    pub async fn list(&self, verified_only: bool, search: Option<&str>) -> Result<Vec<Organization>> {
        let organizations = self.fetch_all().await?;

        let mut filters = Vec::new();
        if verified_only {
            filters.push(FieldFilter::Equals {
                field: "verified".to_string(),
                value: FilterValue::Bool(true),
            });
        }

        let query = ListQuery {
            search: search.map(|term| SearchFilter {
                term: term.to_string(),
                fields: vec!["name"],
            }),
            filters,
            sort: None,
        };

        Ok(listing::select(organizations, &query))
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Organization>> {
        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations WHERE id = $1",
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch organization {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Organization> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Organization '{}' not found", id)))
    }

    /// Organizations whose region set includes `region_id`
    pub async fn list_by_region(&self, region_id: Uuid) -> Result<Vec<Organization>> {
        self.regions.get(region_id).await?;

        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations WHERE $1 = ANY(region_ids) ORDER BY name ASC, id ASC",
            ORGANIZATION_COLUMNS
        ))
        .bind(region_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch organizations for region {}: {:?}", region_id, e);
            AppError::Database(e)
        })
    }

    pub async fn stats(&self, id: Uuid) -> Result<OrganizationStats> {
        let organization = self.get(id).await?;

        let donations = sqlx::query_as::<_, Donation>(
            r#"
            SELECT id, user_id, region_id, organization_id, donation_type,
                   amount, description, created_at
            FROM donations
            WHERE organization_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch donations for organization {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let totals = DonationTotals::from_donations(&donations);
        Ok(OrganizationStats::new(&organization, &totals))
    }

    /// Register a new, unverified organization. Every region must exist.
    pub async fn create(&self, dto: CreateOrganizationDto) -> Result<Organization> {
        self.regions.ensure_exist(&dto.region_ids).await?;

        let organization = sqlx::query_as::<_, Organization>(&format!(
            r#"
            INSERT INTO organizations (
                id, name, description, region_ids, contact_email, website, verified,
                volunteers_available, shelter_capacity, food_stock_tons, water_stock_liters,
                medical_supply_units, transport_vehicles, emergency_fund_usd, field_hospitals
            )
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.region_ids)
        .bind(&dto.contact_email)
        .bind(&dto.website)
        .bind(dto.volunteers_available)
        .bind(dto.shelter_capacity)
        .bind(dto.food_stock_tons)
        .bind(dto.water_stock_liters)
        .bind(dto.medical_supply_units)
        .bind(dto.transport_vehicles)
        .bind(dto.emergency_fund_usd)
        .bind(dto.field_hospitals)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create organization: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Organization {} '{}' created", organization.id, organization.name);
        Ok(organization)
    }

    /// Partial update. `website: Some(None)` clears the stored website.
    pub async fn update(&self, id: Uuid, dto: UpdateOrganizationDto) -> Result<Organization> {
        self.get(id).await?;
        if let Some(region_ids) = &dto.region_ids {
            self.regions.ensure_exist(region_ids).await?;
        }

        let organization = sqlx::query_as::<_, Organization>(&format!(
            r#"
            UPDATE organizations SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                region_ids = COALESCE($4, region_ids),
                website = CASE WHEN $5 THEN $6 ELSE website END,
                contact_email = COALESCE($7, contact_email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.description)
        .bind(dto.region_ids)
        .bind(dto.website.is_some())
        .bind(dto.website.flatten())
        .bind(dto.contact_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update organization {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Organization '{}' not found", id)))?;

        tracing::info!("Organization {} updated", id);
        Ok(organization)
    }

    pub async fn set_verification(&self, id: Uuid, verified: bool) -> Result<Organization> {
        let organization = sqlx::query_as::<_, Organization>(&format!(
            r#"
            UPDATE organizations SET verified = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set verification for organization {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Organization '{}' not found", id)))?;

        tracing::info!("Organization {} verified = {}", id, verified);
        Ok(organization)
    }
}
