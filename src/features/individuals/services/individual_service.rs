use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::individuals::dtos::ListIndividualsQuery;
use crate::features::individuals::models::{render_csv, Individual, IndividualStatistics};
use crate::shared::listing::{self, Page};

const INDIVIDUAL_SELECT: &str = r#"
    SELECT
        i.id, i.region_id, r.name AS region_name,
        i.name, i.origin, i.location_type, i.economic_loss_usd,
        i.shelter_status, i.food_water_access, i.health_risk, i.health_severity_score,
        i.family_size, i.time_since_displacement_days,
        i.displacement_start_date, i.displacement_end_date,
        i.age, i.age_group, i.event_severity, i.urgency_score, i.created_at
    FROM individuals i
    LEFT JOIN regions r ON r.id = i.region_id
"#;

/// Read-only access to displaced individuals
pub struct IndividualService {
    pool: PgPool,
}

impl IndividualService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Individuals in insertion order, optionally for one region only
    async fn fetch(&self, region_id: Option<Uuid>) -> Result<Vec<Individual>> {
        sqlx::query_as::<_, Individual>(&format!(
            "{} WHERE ($1::UUID IS NULL OR i.region_id = $1) ORDER BY i.created_at ASC, i.id ASC",
            INDIVIDUAL_SELECT
        ))
        .bind(region_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch individuals: {:?}", e);
            AppError::Database(e)
        })
    }

    /// One page of the searched, filtered and sorted population
    pub async fn list(&self, query: &ListIndividualsQuery) -> Result<Page<Individual>> {
        let request = query.page_request();
        request.offset()?;

        let individuals = self.fetch(None).await?;
        listing::list(individuals, &query.list_query(), &request)
    }

    pub async fn statistics(&self, region_id: Option<Uuid>) -> Result<IndividualStatistics> {
        let individuals = self.fetch(region_id).await?;
        Ok(IndividualStatistics::from_individuals(&individuals))
    }

    pub async fn export_csv(&self, region_id: Option<Uuid>) -> Result<String> {
        let individuals = self.fetch(region_id).await?;
        tracing::info!("Exporting {} individuals as CSV", individuals.len());
        Ok(render_csv(&individuals))
    }
}
