//! Liveness check action.

use std::collections::HashMap;

use chrono::Local;
use serde_json::{json, Value};

use crate::capability::{Action, ResultEnvelope};
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

/// Responds to ping requests so callers can check the server is alive and
/// responsive.
pub struct PingAction;

impl PingAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PingAction {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Responds to ping requests to check server availability"
    }

    fn input_schema(&self) -> ParameterSchema {
        ParameterSchema::object().with_property(
            "message",
            ParameterSchema::string("Optional message to include in the response"),
        )
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
                    ParameterSchema::object()
                        .with_description("The data returned by the tool")
                        .with_property(
                            "status",
                            ParameterSchema::string("The status of the ping operation"),
                        )
                        .with_property(
                            "timestamp",
                            ParameterSchema::string("The timestamp of the ping operation"),
                        )
                        .with_property(
                            "message",
                            ParameterSchema::string(
                                "The optional message included in the ping request",
                            ),
                        ),
                ),
        )
    }

    fn execute(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<ResultEnvelope, CapabilityError> {
        let message = parameters
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("");
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string();

        let mut response = String::from("PONG! Server is alive and responsive.\n");
        response.push_str(&format!("Timestamp: {}\n", timestamp));
        if !message.is_empty() {
            response.push_str(&format!("Message: {}\n", message));
        }

        let data = json!({
            "status": "ok",
            "timestamp": timestamp,
            "message": if message.is_empty() { Value::Null } else { json!(message) },
        });

        Ok(ResultEnvelope::ok_with_data(response, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_without_message() {
        let envelope = PingAction::new().execute(&HashMap::new()).unwrap();
        assert!(envelope.success);
        assert!(envelope.message.starts_with("PONG!"));
        let data = envelope.data.unwrap();
        assert_eq!(data["status"], "ok");
        assert_eq!(data["message"], Value::Null);
    }

    #[test]
    fn test_ping_echoes_message() {
        let mut params = HashMap::new();
        params.insert("message".to_string(), json!("hello"));
        let envelope = PingAction::new().execute(&params).unwrap();
        assert!(envelope.message.contains("Message: hello"));
        assert_eq!(envelope.data.unwrap()["message"], json!("hello"));
    }

    #[test]
    fn test_schema_has_no_required_parameters() {
        let schema = PingAction::new().input_schema();
        assert!(schema.validate().is_ok());
        assert!(schema.required.is_empty());
    }
}
