use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::regions::models::{EconomicLoss, Region};

/// Query parameters for listing regions
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionSearchQuery {
    /// Case-insensitive match on name or description
    #[param(example = "gaza")]
    pub search: Option<String>,
}

/// Query parameters for the severity threshold listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SeverityQuery {
    /// Minimum severity level (inclusive)
    #[param(minimum = 1, maximum = 10, example = 7)]
    pub min_severity: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, Validate)]
pub struct CoordinatesDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Loss breakdown supplied on update. `total` is optional and computed when omitted.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct EconomicLossInput {
    #[validate(range(min = 0.0))]
    pub housing: f64,
    #[validate(range(min = 0.0))]
    pub income: f64,
    #[validate(range(min = 0.0))]
    pub assets: f64,
    pub total: Option<f64>,
}

impl EconomicLossInput {
    pub fn into_loss(self) -> Result<EconomicLoss, String> {
        EconomicLoss::from_parts(self.housing, self.income, self.assets, self.total)
    }
}

/// Partial region update. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateRegionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(nested)]
    pub coordinates: Option<CoordinatesDto>,
    #[validate(range(min = 1, max = 10))]
    pub severity_level: Option<i32>,
    pub description: Option<String>,
    #[validate(nested)]
    pub economic_loss: Option<EconomicLossInput>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdatePredictionDto {
    #[validate(range(min = 0.0))]
    pub predicted_loss: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionResponseDto {
    pub id: Uuid,
    pub name: String,
    pub coordinates: CoordinatesDto,
    pub severity_level: i32,
    pub economic_loss: EconomicLoss,
    pub predicted_loss: f64,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            coordinates: CoordinatesDto {
                lat: region.lat,
                lng: region.lng,
            },
            severity_level: region.severity_level,
            economic_loss: region.economic_loss(),
            predicted_loss: region.predicted_loss,
            name: region.name,
            description: region.description,
            last_updated: region.last_updated,
        }
    }
}
