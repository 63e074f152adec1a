use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::Individual;

/// Summary over a set of individuals. Means are 0 for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndividualStatistics {
    pub total_individuals: usize,
    pub total_economic_loss: f64,
    pub total_family_members: i64,
    pub average_health_severity: f64,
    pub average_event_severity: f64,
    pub shelter_status_counts: BTreeMap<String, usize>,
    pub food_water_access_counts: BTreeMap<String, usize>,
    pub health_risk_counts: BTreeMap<String, usize>,
}

impl IndividualStatistics {
    pub fn from_individuals(individuals: &[Individual]) -> Self {
        let mut stats = Self::default();
        let mut health_sum = 0.0;
        let mut event_sum = 0.0;

        for person in individuals {
            stats.total_individuals += 1;
            stats.total_economic_loss += person.economic_loss_usd;
            stats.total_family_members += i64::from(person.family_size);
            health_sum += person.health_severity_score;
            event_sum += person.event_severity;

            *stats
                .shelter_status_counts
                .entry(person.shelter_status.clone())
                .or_insert(0) += 1;
            *stats
                .food_water_access_counts
                .entry(person.food_water_access.clone())
                .or_insert(0) += 1;
            *stats
                .health_risk_counts
                .entry(person.health_risk.clone())
                .or_insert(0) += 1;
        }

        if stats.total_individuals > 0 {
            let count = stats.total_individuals as f64;
            stats.average_health_severity = health_sum / count;
            stats.average_event_severity = event_sum / count;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::individuals::models::individual_fixtures::population;
    use uuid::Uuid;

    #[test]
    fn test_empty_population_yields_zeroes() {
        let stats = IndividualStatistics::from_individuals(&[]);

        assert_eq!(stats.total_individuals, 0);
        assert_eq!(stats.average_health_severity, 0.0);
        assert_eq!(stats.average_event_severity, 0.0);
        assert!(stats.shelter_status_counts.is_empty());
    }

    #[test]
    fn test_sums_means_and_frequencies() {
        let people = population(Uuid::now_v7(), 12);

        let stats = IndividualStatistics::from_individuals(&people);

        let loss: f64 = people.iter().map(|p| p.economic_loss_usd).sum();
        let family: i64 = people.iter().map(|p| i64::from(p.family_size)).sum();
        let health: f64 = people.iter().map(|p| p.health_severity_score).sum::<f64>() / 12.0;
        let event: f64 = people.iter().map(|p| p.event_severity).sum::<f64>() / 12.0;

        assert_eq!(stats.total_individuals, 12);
        assert!((stats.total_economic_loss - loss).abs() < 1e-6);
        assert_eq!(stats.total_family_members, family);
        assert!((stats.average_health_severity - health).abs() < 1e-9);
        assert!((stats.average_event_severity - event).abs() < 1e-9);

        // fixtures cycle three categories per field
        assert_eq!(stats.shelter_status_counts.get("None"), Some(&4));
        assert_eq!(stats.food_water_access_counts.get("Partial"), Some(&4));
        assert_eq!(stats.health_risk_counts.values().sum::<usize>(), 12);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(IndividualStatistics::default()).unwrap();

        assert_eq!(json["totalIndividuals"], 0);
        assert_eq!(json["averageHealthSeverity"], 0.0);
        assert!(json["healthRiskCounts"].is_object());
    }
}
