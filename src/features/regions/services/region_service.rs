use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::UpdateRegionDto;
use crate::features::regions::models::{EconomicStats, Region};
use crate::shared::listing::{self, ListQuery, SearchFilter};

const REGION_COLUMNS: &str = r#"
    id, name, lat, lng, severity_level,
    housing_loss, income_loss, assets_loss, total_loss,
    predicted_loss, description, last_updated
"#;

/// Service for conflict regions and their economic figures
pub struct RegionService {
    pool: PgPool,
}

impl RegionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All regions, most severe first
    async fn fetch_all(&self) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(&format!(
            "SELECT {} FROM regions ORDER BY severity_level DESC, name ASC",
            REGION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch regions: {:?}", e);
            AppError::Database(e)
        })
    }

    /// List regions ordered by severity, optionally narrowed by a search term
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Region>> {
        let regions = self.fetch_all().await?;

        let query = ListQuery {
            search: search.map(|term| SearchFilter {
                term: term.to_string(),
                fields: vec!["name", "description"],
            }),
            ..Default::default()
        };

        Ok(listing::select(regions, &query))
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Region>> {
        sqlx::query_as::<_, Region>(&format!("SELECT {} FROM regions WHERE id = $1", REGION_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch region {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<Region> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))
    }

    /// Regions at or above `min_severity`, most severe first
    pub async fn list_by_severity(&self, min_severity: i32) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(&format!(
            "SELECT {} FROM regions WHERE severity_level >= $1 ORDER BY severity_level DESC, name ASC",
            REGION_COLUMNS
        ))
        .bind(min_severity)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch regions by severity: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn economic_stats(&self) -> Result<EconomicStats> {
        let regions = self.fetch_all().await?;
        Ok(EconomicStats::from_regions(&regions))
    }

    /// Fail with NotFound naming the first id that does not resolve
    pub async fn ensure_exist(&self, ids: &[Uuid]) -> Result<()> {
        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM regions WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check region ids: {:?}", e);
                AppError::Database(e)
            })?;

        match ids.iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(AppError::NotFound(format!("Region '{}' not found", missing))),
            None => Ok(()),
        }
    }

    /// Apply a partial update and refresh `last_updated`
    pub async fn update(&self, id: Uuid, dto: UpdateRegionDto) -> Result<Region> {
        let loss = dto
            .economic_loss
            .map(|input| input.into_loss())
            .transpose()
            .map_err(AppError::Validation)?;

        let region = sqlx::query_as::<_, Region>(&format!(
            r#"
            UPDATE regions SET
                name = COALESCE($2, name),
                lat = COALESCE($3, lat),
                lng = COALESCE($4, lng),
                severity_level = COALESCE($5, severity_level),
                description = COALESCE($6, description),
                housing_loss = COALESCE($7, housing_loss),
                income_loss = COALESCE($8, income_loss),
                assets_loss = COALESCE($9, assets_loss),
                total_loss = COALESCE($10, total_loss),
                last_updated = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REGION_COLUMNS
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.coordinates.map(|c| c.lat))
        .bind(dto.coordinates.map(|c| c.lng))
        .bind(dto.severity_level)
        .bind(dto.description)
        .bind(loss.map(|l| l.housing))
        .bind(loss.map(|l| l.income))
        .bind(loss.map(|l| l.assets))
        .bind(loss.map(|l| l.total))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update region {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?;

        tracing::info!("Region {} updated", id);
        Ok(region)
    }

    pub async fn update_prediction(&self, id: Uuid, predicted_loss: f64) -> Result<Region> {
        let region = sqlx::query_as::<_, Region>(&format!(
            r#"
            UPDATE regions SET predicted_loss = $2, last_updated = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REGION_COLUMNS
        ))
        .bind(id)
        .bind(predicted_loss)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update prediction for region {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Region '{}' not found", id)))?;

        tracing::info!("Region {} predicted loss set to {}", id, predicted_loss);
        Ok(region)
    }
}
