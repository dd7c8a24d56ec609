//! Concept explanation action.

use std::collections::BTreeMap;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::capability::{Action, ResultEnvelope};
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

// Keyed map so the enum values in the schema come out in a stable order.
static EXPLANATIONS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    map.insert(
        "tool",
        "# Tools\n\n\
         Tools are executable functions an MCP server exposes to clients. Each tool \
         has a unique name, a description, and a JSON schema describing the \
         parameters it accepts. A client calls a tool by name with a parameter \
         object; the server runs the implementation and returns a result with a \
         success flag, a human-readable message, and optional structured data.\n\n\
         Use a tool when the capability performs an action or computation, rather \
         than merely returning stored content.",
    );
    map.insert(
        "resource",
        "# Resources\n\n\
         Resources are data sources addressed by URI. A resource provider declares \
         a URI pattern; when a client reads a URI matching that pattern, the \
         provider returns the content along with its MIME type. Reading a URI that \
         matches no provider yields an empty result rather than an error.\n\n\
         Use a resource when the capability serves content the client reads, not an \
         action the client triggers.",
    );
    map.insert(
        "prompt",
        "# Prompts\n\n\
         Prompts are structured templates that generate text from named \
         parameters. Each prompt declares a parameter schema; the client supplies \
         arguments and receives the rendered content as a message. Prompts differ \
         from tools only in response shaping: they produce conversational content \
         rather than an operation result.",
    );
    map.insert(
        "server",
        "# MCP Servers\n\n\
         An MCP server exposes a catalog of tools, resources, and prompts to a \
         client over a narrow request/response protocol, commonly JSON-RPC over \
         stdio. The server advertises its capabilities during initialization, \
         answers list requests with machine-readable descriptors, and dispatches \
         call/read/get requests to the registered implementations.",
    );
    map.insert(
        "client",
        "# MCP Clients\n\n\
         An MCP client connects to one or more MCP servers, discovers their \
         capabilities, and invokes them on behalf of a user or model. The client \
         owns the transport lifecycle: it launches or connects to the server, \
         performs the initialization handshake, and routes tool calls, resource \
         reads, and prompt requests.",
    );
    map
});

/// Provides a detailed explanation of an MCP concept. The `concept`
/// parameter is enum-valued; asking about an unknown concept fails softly
/// with the list of valid concepts as advisory data.
pub struct ExplainConceptAction;

impl ExplainConceptAction {
    pub fn new() -> Self {
        Self
    }

    fn available_concepts() -> String {
        EXPLANATIONS
            .keys()
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ExplainConceptAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ExplainConceptAction {
    fn name(&self) -> &str {
        "explain_concept"
    }

    fn description(&self) -> &str {
        "Provides a detailed explanation of an MCP concept"
    }

    fn input_schema(&self) -> ParameterSchema {
        ParameterSchema::object()
            .with_property(
                "concept",
                ParameterSchema::string_enum(
                    "The MCP concept to explain",
                    EXPLANATIONS.keys().copied(),
                ),
            )
            .with_required(["concept"])
    }

    fn output_schema(&self) -> Option<ParameterSchema> {
        Some(
            ParameterSchema::object()
                .with_property(
                    "success",
                    ParameterSchema::boolean("Whether the tool execution was successful"),
                )
                .with_property(
                    "message",
                    ParameterSchema::string("A message describing the result"),
                )
                .with_property(
                    "data",
                    ParameterSchema::string("The explanation of the concept"),
                )
                .with_required(["success", "message", "data"]),
        )
    }

    fn execute(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<ResultEnvelope, CapabilityError> {
        let concept = match parameters.get("concept").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return Ok(ResultEnvelope::failure("Missing required parameter: concept")),
        };

        match EXPLANATIONS.get(concept.as_str()) {
            Some(explanation) => Ok(ResultEnvelope::ok_with_data(
                format!("Explanation of concept: {}", concept),
                Value::String((*explanation).to_string()),
            )),
            None => {
                log::warn!("Unknown concept requested: {}", concept);
                Ok(ResultEnvelope::failure_with_data(
                    format!("Unknown concept: {}", concept),
                    Value::String(format!(
                        "Available concepts: {}",
                        Self::available_concepts()
                    )),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_concept() {
        let mut params = HashMap::new();
        params.insert("concept".to_string(), json!("tool"));
        let envelope = ExplainConceptAction::new().execute(&params).unwrap();
        assert!(envelope.success);
        assert!(envelope
            .data
            .unwrap()
            .as_str()
            .unwrap()
            .starts_with("# Tools"));
    }

    #[test]
    fn test_concept_lookup_is_case_insensitive() {
        let mut params = HashMap::new();
        params.insert("concept".to_string(), json!("Resource"));
        let envelope = ExplainConceptAction::new().execute(&params).unwrap();
        assert!(envelope.success);
    }

    #[test]
    fn test_unknown_concept_fails_with_advisory_data() {
        let mut params = HashMap::new();
        params.insert("concept".to_string(), json!("widget"));
        let envelope = ExplainConceptAction::new().execute(&params).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "Unknown concept: widget");
        assert!(envelope
            .data
            .unwrap()
            .as_str()
            .unwrap()
            .starts_with("Available concepts:"));
    }

    #[test]
    fn test_missing_concept_is_terminal_failure() {
        let envelope = ExplainConceptAction::new().execute(&HashMap::new()).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "Missing required parameter: concept");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_schema_enumerates_concepts() {
        let schema = ExplainConceptAction::new().input_schema();
        assert!(schema.validate().is_ok());
        let concept = &schema.properties["concept"];
        assert_eq!(
            concept.enum_values.as_ref().unwrap().len(),
            EXPLANATIONS.len()
        );
    }
}
