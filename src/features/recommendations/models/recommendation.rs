use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::donations::models::DonationType;
use crate::shared::llm::LlmResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

impl UrgencyLevel {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(UrgencyLevel::High),
            "medium" => Some(UrgencyLevel::Medium),
            "low" => Some(UrgencyLevel::Low),
            _ => None,
        }
    }
}

fn parse_donation_type(value: &str) -> Option<DonationType> {
    DonationType::ALL.into_iter().find(|t| t.as_str() == value)
}

/// Validated donation recommendation. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation: String,
    pub suggested_amount: f64,
    pub urgency_level: UrgencyLevel,
    pub donation_type: DonationType,
    pub reasoning: String,
}

/// Completion output before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    pub recommendation: Option<String>,
    pub suggested_amount: Option<f64>,
    pub urgency_level: Option<String>,
    pub donation_type: Option<String>,
    pub reasoning: Option<String>,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("missing field '{}'", field))
}

impl LlmResponse for RawRecommendation {
    type Output = Recommendation;

    fn validate(self) -> Result<Recommendation, String> {
        let recommendation = required_text(self.recommendation, "recommendation")?;
        let suggested_amount = self
            .suggested_amount
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| "missing field 'suggestedAmount'".to_string())?;
        let urgency = required_text(self.urgency_level, "urgencyLevel")?;
        let kind = required_text(self.donation_type, "donationType")?;
        let reasoning = required_text(self.reasoning, "reasoning")?;

        let urgency_level = UrgencyLevel::parse(&urgency).ok_or_else(|| {
            format!("urgencyLevel '{}' is not one of high, medium, low", urgency)
        })?;
        let donation_type = parse_donation_type(&kind).ok_or_else(|| {
            format!(
                "donationType '{}' is not one of money, food, supplies, volunteers",
                kind
            )
        })?;

        Ok(Recommendation {
            recommendation,
            suggested_amount,
            urgency_level,
            donation_type,
            reasoning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::parse_validated;

    const VALID: &str = r#"{
        "recommendation": "Fund emergency medical kits through Doctors Without Borders",
        "suggestedAmount": 500,
        "urgencyLevel": "high",
        "donationType": "money",
        "reasoning": "Severity 9 with verified medical partners on the ground"
    }"#;

    #[test]
    fn test_valid_response_passes_unchanged() {
        let rec = parse_validated::<RawRecommendation>(VALID).unwrap();

        assert_eq!(
            rec.recommendation,
            "Fund emergency medical kits through Doctors Without Borders"
        );
        assert_eq!(rec.suggested_amount, 500.0);
        assert_eq!(rec.urgency_level, UrgencyLevel::High);
        assert_eq!(rec.donation_type, DonationType::Money);
        assert_eq!(
            rec.reasoning,
            "Severity 9 with verified medical partners on the ground"
        );
    }

    #[test]
    fn test_missing_urgency_names_the_field() {
        let text = VALID.replace("\"urgencyLevel\": \"high\",", "");

        let err = parse_validated::<RawRecommendation>(&text).unwrap_err();

        assert!(err.contains("urgencyLevel"));
    }

    #[test]
    fn test_urgency_outside_allowed_set_fails() {
        let text = VALID.replace("\"high\"", "\"critical\"");

        let err = parse_validated::<RawRecommendation>(&text).unwrap_err();

        assert!(err.contains("critical"));
    }

    #[test]
    fn test_unknown_donation_type_fails() {
        let text = VALID.replace("\"money\"", "\"crypto\"");

        let err = parse_validated::<RawRecommendation>(&text).unwrap_err();

        assert!(err.contains("donationType"));
    }

    #[test]
    fn test_blank_text_and_zero_amount_fail() {
        let blank = VALID.replace(
            "\"Severity 9 with verified medical partners on the ground\"",
            "\"  \"",
        );
        let zero = VALID.replace("500", "0");

        assert!(parse_validated::<RawRecommendation>(&blank)
            .unwrap_err()
            .contains("reasoning"));
        assert!(parse_validated::<RawRecommendation>(&zero)
            .unwrap_err()
            .contains("suggestedAmount"));
    }

    #[test]
    fn test_fenced_response_is_extracted() {
        let text = format!("Here you go:\n```json\n{}\n```", VALID);

        let rec = parse_validated::<RawRecommendation>(&text).unwrap();

        assert_eq!(rec.donation_type, DonationType::Money);
    }

    #[test]
    fn test_non_json_fails() {
        assert!(parse_validated::<RawRecommendation>("I cannot help with that.").is_err());
    }

    #[test]
    fn test_schema_lists_allowed_values() {
        let schema = RawRecommendation::json_schema_string();

        assert!(schema.contains("urgencyLevel"));
        assert!(!schema.contains("\"critical\""));
        assert!(schema.contains("\"volunteers\""));
    }
}
