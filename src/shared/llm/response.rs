use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// A structured reply expected from a vision model
///
/// Parsing never fails outright: when the reply cannot be read, a default
/// value is returned and marked as a fallback so the caller can substitute
/// its own result.
pub trait LlmResponse: DeserializeOwned + Default + JsonSchema {
    /// Mark this reply as a fallback due to parsing failure
    fn mark_as_fallback(&mut self, error_message: String);

    /// Check if this reply was successfully parsed
    fn is_success(&self) -> bool;

    /// JSON schema of the reply, embedded in prompts
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
