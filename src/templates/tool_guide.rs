//! Tool implementation guide template.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::capability::{Template, TemplateResponse};
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

const LANGUAGES: &[&str] = &["java", "kotlin", "python", "typescript", "rust"];

/// Renders a step-by-step guide for implementing a new MCP tool. All
/// parameters are optional; placeholders stand in for anything the caller
/// leaves out.
pub struct ToolImplementationGuideTemplate;

impl ToolImplementationGuideTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ToolImplementationGuideTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for ToolImplementationGuideTemplate {
    fn name(&self) -> &str {
        "tool_implementation_guide"
    }

    fn description(&self) -> &str {
        "A step-by-step guide for implementing a new MCP tool"
    }

    fn parameter_schema(&self) -> ParameterSchema {
        ParameterSchema::object()
            .with_property(
                "toolName",
                ParameterSchema::string("The name of the tool to implement"),
            )
            .with_property(
                "description",
                ParameterSchema::string("What the tool should do"),
            )
            .with_property(
                "language",
                ParameterSchema::string_enum(
                    "The implementation language",
                    LANGUAGES.iter().copied(),
                ),
            )
    }

    fn render(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<TemplateResponse, CapabilityError> {
        let tool_name = parameters
            .get("toolName")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("my_tool");
        let description = parameters
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("(describe what the tool does)");
        let language = match parameters.get("language").and_then(Value::as_str) {
            Some(lang) if !lang.is_empty() => {
                let lang = lang.to_lowercase();
                if !LANGUAGES.contains(&lang.as_str()) {
                    return Err(CapabilityError::InvalidParameter {
                        name: "language".to_string(),
                        reason: format!(
                            "must be one of: {}",
                            LANGUAGES.join(", ")
                        ),
                    });
                }
                lang
            }
            _ => "java".to_string(),
        };

        let content = format!(
            "# Implementing the `{tool_name}` MCP Tool\n\n\
             Purpose: {description}\n\
             Language: {language}\n\n\
             ## 1. Define the interface\n\n\
             Give the tool a unique name (`{tool_name}`), a one-line description, \
             and a JSON schema for its parameters. Mark each parameter required or \
             optional and describe it; clients show these descriptions to users.\n\n\
             ## 2. Implement the execution\n\n\
             1. Validate the parameters against the schema before doing any work\n\
             2. Return a missing-parameter failure for each absent required field\n\
             3. Perform the tool's work: {description}\n\
             4. Return a result with `success`, a human-readable `message`, and \
             any structured `data` the caller can use programmatically\n\n\
             ## 3. Handle failures in-band\n\n\
             A tool failure is a result with `success: false`, not a protocol \
             error. Never let an exception escape the tool; catch it and report \
             the message in the result.\n\n\
             ## 4. Register and test\n\n\
             1. Register the tool with the server's registry so it appears in the \
             tool listing\n\
             2. Write tests for the success path, each missing-parameter case, \
             and the failure path\n\
             3. Call the tool end to end through a connected client"
        );

        let metadata = HashMap::from([
            ("toolName".to_string(), json!(tool_name)),
            ("language".to_string(), json!(language)),
        ]);

        Ok(TemplateResponse::new(content).with_metadata(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_all_parameters() {
        let params = HashMap::from([
            ("toolName".to_string(), json!("weather_lookup")),
            ("description".to_string(), json!("Fetches the forecast")),
            ("language".to_string(), json!("rust")),
        ]);
        let response = ToolImplementationGuideTemplate::new().render(&params).unwrap();
        assert!(response.content.contains("`weather_lookup`"));
        assert!(response.content.contains("Fetches the forecast"));
        assert!(response.content.contains("Language: rust"));
        assert_eq!(response.metadata.unwrap()["language"], json!("rust"));
    }

    #[test]
    fn test_render_with_defaults() {
        let response = ToolImplementationGuideTemplate::new()
            .render(&HashMap::new())
            .unwrap();
        assert!(response.content.contains("`my_tool`"));
        assert!(response.content.contains("Language: java"));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let params = HashMap::from([("language".to_string(), json!("cobol"))]);
        let err = ToolImplementationGuideTemplate::new()
            .render(&params)
            .unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn test_schema_has_no_required_parameters() {
        let schema = ToolImplementationGuideTemplate::new().parameter_schema();
        assert!(schema.validate().is_ok());
        assert!(schema.required.is_empty());
        assert!(schema.properties["language"].enum_values.is_some());
    }
}
