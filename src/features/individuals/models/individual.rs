use std::borrow::Cow;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::UNKNOWN_REGION_NAME;
use crate::shared::listing::{FieldValue, Listable};

/// Displaced individual joined with the display name of their region
#[derive(Debug, Clone, FromRow)]
pub struct Individual {
    pub id: Uuid,
    pub region_id: Uuid,
    /// `None` when the region does not resolve
    pub region_name: Option<String>,
    pub name: String,
    pub origin: String,
    pub location_type: String,
    pub economic_loss_usd: f64,
    pub shelter_status: String,
    pub food_water_access: String,
    pub health_risk: String,
    pub health_severity_score: f64,
    pub family_size: i32,
    pub time_since_displacement_days: i32,
    /// Stored as received; see [`super::render_csv`] for normalization
    pub displacement_start_date: String,
    pub displacement_end_date: Option<String>,
    pub age: i32,
    pub age_group: String,
    pub event_severity: f64,
    pub urgency_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Individual {
    pub fn region_display_name(&self) -> &str {
        self.region_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_REGION_NAME)
    }
}

impl Listable for Individual {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(Cow::Borrowed(&self.name))),
            "region_id" => Some(FieldValue::Text(Cow::Owned(self.region_id.to_string()))),
            "event_severity" => Some(FieldValue::Number(self.event_severity)),
            "health_severity_score" => Some(FieldValue::Number(self.health_severity_score)),
            "economic_loss_usd" => Some(FieldValue::Number(self.economic_loss_usd)),
            "time_since_displacement_days" => {
                Some(FieldValue::Number(f64::from(self.time_since_displacement_days)))
            }
            "urgency_score" => Some(FieldValue::Number(self.urgency_score)),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;

    const SHELTER: [&str; 3] = ["None", "Temporary", "Permanent"];
    const ACCESS: [&str; 3] = ["None", "Partial", "Full"];
    const RISK: [&str; 3] = ["No Risk", "Moderate", "High"];
    const ORIGIN: [&str; 5] = ["Mexico", "Syria", "Yemen", "Ukraine", "Sudan"];

    /// Random individual in `region_id` with categorical fields picked by `seed`
    pub fn individual(region_id: Uuid, seed: usize) -> Individual {
        let age: i32 = (0..90).fake();
        Individual {
            id: Uuid::now_v7(),
            region_id,
            region_name: Some("Gaza Strip".to_string()),
            name: Name().fake(),
            origin: ORIGIN[seed % 5].to_string(),
            location_type: "Urban".to_string(),
            economic_loss_usd: (0.0..50_000.0).fake(),
            shelter_status: SHELTER[seed % 3].to_string(),
            food_water_access: ACCESS[seed % 3].to_string(),
            health_risk: RISK[seed % 3].to_string(),
            health_severity_score: (0.0..10.0).fake(),
            family_size: (1..9).fake(),
            time_since_displacement_days: (0..700).fake(),
            displacement_start_date: "2024-10-18T00:00:00.000Z".to_string(),
            displacement_end_date: None,
            age,
            age_group: if age < 18 { "Child (0-17)" } else { "Adult (18-59)" }.to_string(),
            event_severity: (0.0..100.0).fake(),
            urgency_score: (0.0..10.0).fake(),
            created_at: Utc::now(),
        }
    }

    pub fn population(region_id: Uuid, n: usize) -> Vec<Individual> {
        (0..n).map(|i| individual(region_id, i)).collect()
    }
}
