use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::individuals::models::Individual;
use crate::shared::listing::{
    FieldFilter, FilterValue, ListQuery, PageRequest, SearchFilter, SortOrder, SortSpec,
};

/// Sortable individual fields. Accepts the historical column names and snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum IndividualSortField {
    #[serde(rename = "Event_Severity", alias = "event_severity")]
    EventSeverity,
    #[serde(rename = "Health_Severity_Score", alias = "health_severity_score")]
    HealthSeverityScore,
    #[serde(rename = "Economic_Loss_USD", alias = "economic_loss_usd")]
    EconomicLossUsd,
    #[serde(
        rename = "Time_Since_Displacement_Days",
        alias = "time_since_displacement_days"
    )]
    TimeSinceDisplacementDays,
    #[serde(rename = "Urgency_Score", alias = "urgency_score")]
    UrgencyScore,
}

impl IndividualSortField {
    pub fn field_name(&self) -> &'static str {
        match self {
            IndividualSortField::EventSeverity => "event_severity",
            IndividualSortField::HealthSeverityScore => "health_severity_score",
            IndividualSortField::EconomicLossUsd => "economic_loss_usd",
            IndividualSortField::TimeSinceDisplacementDays => "time_since_displacement_days",
            IndividualSortField::UrgencyScore => "urgency_score",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListIndividualsQuery {
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub num_items: Option<usize>,
    /// Continuation cursor from the previous page
    pub cursor: Option<String>,
    pub region_id: Option<Uuid>,
    /// Minimum event severity (inclusive)
    pub min_severity: Option<f64>,
    /// Case-insensitive match on name
    pub search: Option<String>,
    pub sort_by: Option<IndividualSortField>,
    /// Defaults to `desc` when `sort_by` is given
    pub sort_order: Option<SortOrder>,
}

impl ListIndividualsQuery {
    pub fn list_query(&self) -> ListQuery {
        let mut filters = Vec::new();
        if let Some(region_id) = self.region_id {
            filters.push(FieldFilter::Equals {
                field: "region_id".to_string(),
                value: FilterValue::Text(region_id.to_string()),
            });
        }
        if let Some(min) = self.min_severity {
            filters.push(FieldFilter::AtLeast {
                field: "event_severity".to_string(),
                min,
            });
        }

        ListQuery {
            search: self.search.as_ref().map(|term| SearchFilter {
                term: term.clone(),
                fields: vec!["name"],
            }),
            filters,
            sort: self.sort_by.map(|field| SortSpec {
                field: field.field_name().to_string(),
                order: self.sort_order.unwrap_or(SortOrder::Desc),
            }),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.num_items, self.cursor.clone())
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionFilterQuery {
    /// Restrict to one region
    pub region_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndividualResponseDto {
    pub id: Uuid,
    pub region_id: Uuid,
    pub region_name: String,
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
    pub displacement_start_date: String,
    pub displacement_end_date: Option<String>,
    pub age: i32,
    pub age_group: String,
    pub event_severity: f64,
    pub urgency_score: f64,
}

impl From<Individual> for IndividualResponseDto {
    fn from(person: Individual) -> Self {
        Self {
            region_name: person.region_display_name().to_string(),
            id: person.id,
            region_id: person.region_id,
            name: person.name,
            origin: person.origin,
            location_type: person.location_type,
            economic_loss_usd: person.economic_loss_usd,
            shelter_status: person.shelter_status,
            food_water_access: person.food_water_access,
            health_risk: person.health_risk,
            health_severity_score: person.health_severity_score,
            family_size: person.family_size,
            time_since_displacement_days: person.time_since_displacement_days,
            displacement_start_date: person.displacement_start_date,
            displacement_end_date: person.displacement_end_date,
            age: person.age,
            age_group: person.age_group,
            event_severity: person.event_severity,
            urgency_score: person.urgency_score,
        }
    }
}
