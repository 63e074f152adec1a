use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Region;

/// Largest accepted gap between a supplied total and the component sum
const TOTAL_TOLERANCE: f64 = 0.01;

/// Economic loss breakdown. `total` always equals housing + income + assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EconomicLoss {
    pub housing: f64,
    pub income: f64,
    pub assets: f64,
    pub total: f64,
}

impl EconomicLoss {
    pub fn new(housing: f64, income: f64, assets: f64) -> Self {
        Self {
            housing,
            income,
            assets,
            total: housing + income + assets,
        }
    }

    /// Build from components and an optional caller-supplied total.
    ///
    /// Components must be non-negative. A supplied total must match the sum of
    /// the components; when omitted it is computed.
    pub fn from_parts(
        housing: f64,
        income: f64,
        assets: f64,
        total: Option<f64>,
    ) -> Result<Self, String> {
        for (label, value) in [("housing", housing), ("income", income), ("assets", assets)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("economic loss {} must be a non-negative number", label));
            }
        }

        let loss = Self::new(housing, income, assets);

        match total {
            Some(given) if (given - loss.total).abs() > TOTAL_TOLERANCE => Err(format!(
                "economic loss total {} does not equal housing + income + assets ({})",
                given, loss.total
            )),
            _ => Ok(loss),
        }
    }
}

/// Loss figures summed across regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EconomicStats {
    pub total_housing_loss: f64,
    pub total_income_loss: f64,
    pub total_assets_loss: f64,
    pub total_loss: f64,
    pub predicted_total_loss: f64,
}

impl EconomicStats {
    pub fn from_regions(regions: &[Region]) -> Self {
        regions.iter().fold(Self::default(), |acc, region| Self {
            total_housing_loss: acc.total_housing_loss + region.housing_loss,
            total_income_loss: acc.total_income_loss + region.income_loss,
            total_assets_loss: acc.total_assets_loss + region.assets_loss,
            total_loss: acc.total_loss + region.total_loss,
            predicted_total_loss: acc.predicted_total_loss + region.predicted_loss,
        })
    }
}
