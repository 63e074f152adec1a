use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Raw structured output returned by a completion model.
///
/// The raw form is deliberately lenient so that a missing or malformed field
/// is reported by `validate` with its name instead of a serde message.
pub trait LlmResponse: DeserializeOwned {
    /// Strictly typed value produced once validation succeeds
    type Output: JsonSchema;

    /// Check every required field, naming the first offending one on failure
    fn validate(self) -> Result<Self::Output, String>;

    /// JSON schema of the validated output, embedded in system prompts
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self::Output>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
