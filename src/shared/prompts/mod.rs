//! Prompt templates for the vision analyzer.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

/// Render the waste classification prompt.
///
/// # Arguments
/// * `waste_types` - Allowed waste type names
/// * `json_schema` - JSON schema of the expected reply
pub fn render_classification_prompt(
    waste_types: &[String],
    json_schema: &str,
) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("waste_types", Value::from(waste_types.to_vec()));
    ctx.insert("json_schema", Value::from(json_schema));

    render_template("vision/classify.jinja", &ctx)
}

/// Render the cleanup verification prompt.
pub fn render_verification_prompt(json_schema: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("json_schema", Value::from(json_schema));

    render_template("vision/verify.jinja", &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_classification_prompt() {
        let types = vec!["plastic".to_string(), "glass".to_string()];
        let prompt = render_classification_prompt(&types, "{\"type\": \"object\"}").unwrap();
        assert!(prompt.contains("plastic, glass"));
        assert!(prompt.contains("{\"type\": \"object\"}"));
    }

    #[test]
    fn test_render_verification_prompt() {
        let prompt = render_verification_prompt("SCHEMA").unwrap();
        assert!(prompt.contains("SCHEMA"));
        assert!(prompt.contains("second"));
    }
}
