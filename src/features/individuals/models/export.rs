//! CSV rendering of individuals.
//!
//! Column order and quoting are fixed: text columns are always double-quoted
//! with embedded quotes doubled, numbers and timestamps are bare, and a
//! missing end date is an empty field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::Individual;

pub const CSV_HEADERS: [&str; 17] = [
    "Name",
    "Origin",
    "Location Type",
    "Economic Loss (USD)",
    "Shelter Status",
    "Food/Water Access",
    "Health Risk",
    "Health Severity Score",
    "Family Size",
    "Time Since Displacement (Days)",
    "Displacement Start Date",
    "Displacement End Date",
    "Age",
    "Age Group",
    "EVENT SEVERITY (PREDICTED)",
    "URGENCY SCORE (PREDICTED)",
    "Region",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// ISO 8601 UTC with milliseconds. Unparseable input is kept, quoted.
fn timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => {
            tracing::warn!("Unrecognized displacement date '{}', exporting as text", raw);
            quote(raw)
        }
    }
}

fn row(person: &Individual) -> String {
    [
        quote(&person.name),
        quote(&person.origin),
        quote(&person.location_type),
        person.economic_loss_usd.to_string(),
        quote(&person.shelter_status),
        quote(&person.food_water_access),
        quote(&person.health_risk),
        person.health_severity_score.to_string(),
        person.family_size.to_string(),
        person.time_since_displacement_days.to_string(),
        timestamp(&person.displacement_start_date),
        person
            .displacement_end_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(timestamp)
            .unwrap_or_default(),
        person.age.to_string(),
        quote(&person.age_group),
        person.event_severity.to_string(),
        person.urgency_score.to_string(),
        quote(person.region_display_name()),
    ]
    .join(",")
}

/// Header line followed by one line per individual, joined by `\n` without a
/// trailing newline
pub fn render_csv(individuals: &[Individual]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(individuals.iter().map(row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::individuals::models::individual_fixtures::{individual, population};
    use uuid::Uuid;

    fn christina() -> Individual {
        let mut person = individual(Uuid::now_v7(), 0);
        person.name = "Christina Ward".to_string();
        person.origin = "Mexico".to_string();
        person.location_type = "Urban".to_string();
        person.economic_loss_usd = 2231.75;
        person.shelter_status = "None".to_string();
        person.food_water_access = "Partial".to_string();
        person.health_risk = "No Risk".to_string();
        person.health_severity_score = 0.0;
        person.family_size = 5;
        person.time_since_displacement_days = 190;
        person.displacement_start_date = "2024-10-18".to_string();
        person.displacement_end_date = Some("2025-12-06T00:00:00.000Z".to_string());
        person.age = 6;
        person.age_group = "Child (0-17)".to_string();
        person.event_severity = 66.38;
        person.urgency_score = 7.2;
        person.region_name = Some("Gaza Strip".to_string());
        person
    }

    fn fields(line: &str) -> usize {
        // Fixture text has no embedded commas
        line.split(',').count()
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let csv = render_csv(&[]);

        assert_eq!(csv.lines().count(), 1);
        assert_eq!(fields(&csv), 17);
        assert!(csv.starts_with("Name,Origin,Location Type,"));
        assert!(csv.ends_with(",Region"));
    }

    #[test]
    fn test_known_row_is_bit_exact() {
        let csv = render_csv(&[christina()]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Christina Ward\",\"Mexico\",\"Urban\",2231.75,\"None\",\"Partial\",\"No Risk\",0,5,190,\
             2024-10-18T00:00:00.000Z,2025-12-06T00:00:00.000Z,6,\"Child (0-17)\",66.38,7.2,\"Gaza Strip\""
        );
    }

    #[test]
    fn test_row_count_and_width() {
        let people = population(Uuid::now_v7(), 7);

        let csv = render_csv(&people);

        assert_eq!(csv.lines().count(), people.len() + 1);
        assert!(csv.lines().all(|line| fields(line) == 17));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_missing_end_date_is_empty_field() {
        let mut person = christina();
        person.displacement_end_date = None;

        let csv = render_csv(&[person]);
        let row = csv.lines().nth(1).unwrap();
        let columns: Vec<&str> = row.split(',').collect();

        assert_eq!(columns[11], "");
        assert!(!row.contains("undefined"));
        assert!(!row.contains("null"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut person = christina();
        person.name = "Ahmed \"Abu\" Said".to_string();

        let csv = render_csv(&[person]);

        assert!(csv.contains("\"Ahmed \"\"Abu\"\" Said\""));
    }

    #[test]
    fn test_unknown_region_in_export() {
        let mut person = christina();
        person.region_name = None;

        let csv = render_csv(&[person]);

        assert!(csv.ends_with(",\"Unknown Region\""));
    }

    #[test]
    fn test_timestamps_normalize_to_utc_millis() {
        assert_eq!(timestamp("2024-10-18T05:30:00+02:00"), "2024-10-18T03:30:00.000Z");
        assert_eq!(timestamp("2024-10-18T05:30:00"), "2024-10-18T05:30:00.000Z");
        assert_eq!(timestamp("2024-10-18"), "2024-10-18T00:00:00.000Z");
        assert_eq!(timestamp("someday"), "\"someday\"");
    }
}
