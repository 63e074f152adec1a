//! Structured output extraction from completion text.
//!
//! Models wrap the requested object in prose or markdown fences and make
//! small syntax slips. Each stage below is tried in turn and the first one
//! that deserializes wins; validation then runs on the result.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::LlmResponse;

lazy_static! {
    /// `,` directly before a closing brace or bracket
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// Adjacent string literals joined with `+`
    static ref STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Body of the first fenced block, skipping an optional language tag
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")? + 3;
    let body_start = open + text[open..].find('\n')? + 1;
    let body_len = text[body_start..].find("```")?;
    Some(text[body_start..body_start + body_len].trim())
}

/// Locate the object candidate inside completion text
fn object_candidate(text: &str) -> Result<&str, String> {
    if let Some(block) = fenced_block(text) {
        return Ok(block);
    }

    let start = text
        .find('{')
        .ok_or_else(|| "completion contains no JSON object".to_string())?;
    match text.rfind('}') {
        Some(end) if end > start => Ok(&text[start..=end]),
        _ => Err("completion contains an unterminated JSON object".to_string()),
    }
}

fn strip_slips(candidate: &str) -> String {
    let joined = STRING_CONCAT_RE.replace_all(candidate, "");
    TRAILING_COMMA_RE.replace_all(&joined, "$1").into_owned()
}

fn repair(candidate: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(candidate, &options)
    })) {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("llm_json could not repair completion: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("llm_json panicked while repairing completion");
            None
        }
    }
}

fn deserialize<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let candidate = object_candidate(text)?;

    if let Ok(value) = serde_json::from_str::<T>(candidate) {
        return Ok(value);
    }

    if let Ok(value) = serde_json::from_str::<T>(&strip_slips(candidate)) {
        tracing::debug!("Completion parsed after removing syntax slips");
        return Ok(value);
    }

    if let Some(value) = repair(candidate).and_then(|r| serde_json::from_str::<T>(&r).ok()) {
        tracing::debug!("Completion parsed after llm_json repair");
        return Ok(value);
    }

    Err(format!(
        "completion is not valid JSON: {}",
        candidate.chars().take(200).collect::<String>()
    ))
}

/// Parse completion text and validate it into the strict output type.
///
/// There is no fallback value: an unparseable response or one failing
/// validation is an error the caller must surface.
pub fn parse_validated<T>(text: &str) -> Result<T::Output, String>
where
    T: LlmResponse,
{
    deserialize::<T>(text)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::donations::models::DonationType;
    use crate::features::recommendations::models::{RawRecommendation, UrgencyLevel};

    const OBJECT: &str = r#"{"recommendation": "Send water purification tablets", "suggestedAmount": 120, "urgencyLevel": "medium", "donationType": "supplies", "reasoning": "Water access is poor in camps"}"#;

    #[test]
    fn test_fenced_json_block_with_prose() {
        let text = format!("Based on the data:\n\n```json\n{}\n```\n\nLet me know.", OBJECT);

        let rec = parse_validated::<RawRecommendation>(&text).unwrap();

        assert_eq!(rec.donation_type, DonationType::Supplies);
        assert_eq!(rec.suggested_amount, 120.0);
    }

    #[test]
    fn test_untagged_fence() {
        let text = format!("```\n{}\n```", OBJECT);

        assert!(parse_validated::<RawRecommendation>(&text).is_ok());
    }

    #[test]
    fn test_object_embedded_in_sentence() {
        let text = format!("My suggestion is {} as requested.", OBJECT);

        let rec = parse_validated::<RawRecommendation>(&text).unwrap();

        assert_eq!(rec.urgency_level, UrgencyLevel::Medium);
    }

    #[test]
    fn test_trailing_commas_are_tolerated() {
        let text = r#"{
            "recommendation": "Volunteer at the field clinic",
            "suggestedAmount": 10,
            "urgencyLevel": "low",
            "donationType": "volunteers",
            "reasoning": "Clinics report staff shortages",
        }"#;

        let rec = parse_validated::<RawRecommendation>(text).unwrap();

        assert_eq!(rec.donation_type, DonationType::Volunteers);
    }

    #[test]
    fn test_concatenated_reasoning_is_joined() {
        let text = r#"{"recommendation": "Fund food parcels", "suggestedAmount": 75, "urgencyLevel": "high", "donationType": "food", "reasoning": "Food stocks " + "are below one week"}"#;

        let rec = parse_validated::<RawRecommendation>(text).unwrap();

        assert_eq!(rec.reasoning, "Food stocks are below one week");
    }

    #[test]
    fn test_strip_slips_handles_nested_objects() {
        assert_eq!(
            strip_slips(r#"{"a": {"b": [1, 2,],},}"#),
            r#"{"a": {"b": [1, 2]}}"#
        );
    }

    #[test]
    fn test_text_without_object_fails() {
        let err = parse_validated::<RawRecommendation>("I cannot help with that.").unwrap_err();

        assert!(err.contains("no JSON object"));
    }

    #[test]
    fn test_parsed_but_invalid_object_fails_validation() {
        let text = OBJECT.replace("\"medium\"", "\"urgent\"");

        let err = parse_validated::<RawRecommendation>(&text).unwrap_err();

        assert!(err.contains("urgent"));
    }
}
