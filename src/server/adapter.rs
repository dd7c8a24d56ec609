//! Protocol-to-dispatcher adapter.
//!
//! Maps JSON-RPC methods onto dispatcher operations and shapes the results
//! for the wire. Capability failures stay in-band: a failed tool call is a
//! successful JSON-RPC response whose payload says `isError`, never a
//! protocol error. Protocol errors are reserved for malformed requests and
//! unknown methods.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::dispatch::Dispatcher;
use crate::registry::Registry;
use crate::server::protocol::{
    CallToolResult, GetPromptResult, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    NamedCallParams, PromptArgument, PromptDescriptor, PromptMessage, ReadResourceParams,
    ReadResourceResult, ResourceContents, ResourceDescriptor, ServerInfo, TextContent,
    ToolDescriptor, INVALID_PARAMS, METHOD_NOT_FOUND,
};
use crate::server::{SERVER_NAME, SERVER_VERSION};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stateless request handler over a populated registry.
pub struct ProtocolAdapter {
    dispatcher: Dispatcher,
}

impl ProtocolAdapter {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Handle one request. Returns `None` for notifications, which get no
    /// response on the wire.
    pub fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            log::debug!("Ignoring notification: {}", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.list_tools(id),
            "tools/call" => self.call_tool(id, request.params),
            "resources/list" => self.list_resources(id),
            "resources/read" => self.read_resource(id, request.params),
            "prompts/list" => self.list_prompts(id),
            "prompts/get" => self.get_prompt(id, request.params),
            other => {
                log::warn!("Unknown method: {}", other);
                JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                )
            }
        };
        Some(response)
    }

    fn initialize(&self, id: Value) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: json!({
                "tools": {},
                "resources": {},
                "prompts": {},
            }),
            server_info: ServerInfo {
                name: SERVER_NAME,
                version: SERVER_VERSION,
            },
        };
        JsonRpcResponse::success(id, json!(result))
    }

    fn list_tools(&self, id: Value) -> JsonRpcResponse {
        let mut tools: Vec<ToolDescriptor> = self
            .dispatcher
            .registry()
            .actions()
            .iter()
            .map(|action| ToolDescriptor {
                name: action.name().to_string(),
                description: action.description().to_string(),
                input_schema: action.input_schema().to_value(),
                output_schema: action.output_schema().map(|s| s.to_value()),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call: NamedCallParams = match parse_params(params) {
            Ok(call) => call,
            Err(response) => return response(id),
        };

        let envelope = self.dispatcher.invoke_action(&call.name, &call.arguments);
        let text = match envelope.data {
            Some(data) => match serde_json::to_string_pretty(&data) {
                Ok(pretty) => format!("{}\n\n{}", envelope.message, pretty),
                Err(e) => {
                    log::warn!("Failed to render tool data for '{}': {}", call.name, e);
                    format!("{}\n\nError: Failed to convert data to JSON", envelope.message)
                }
            },
            None => envelope.message,
        };

        let result = CallToolResult {
            content: vec![TextContent::new(text)],
            is_error: !envelope.success,
        };
        JsonRpcResponse::success(id, json!(result))
    }

    fn list_resources(&self, id: Value) -> JsonRpcResponse {
        let resources: Vec<ResourceDescriptor> = self
            .dispatcher
            .registry()
            .providers()
            .iter()
            .map(|provider| ResourceDescriptor {
                uri: provider.uri_pattern().to_string(),
                name: provider.uri_pattern().to_string(),
                description: provider.description().to_string(),
                mime_type: "text/markdown".to_string(),
            })
            .collect();
        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    fn read_resource(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let read: ReadResourceParams = match parse_params(params) {
            Ok(read) => read,
            Err(response) => return response(id),
        };

        let result = ReadResourceResult {
            contents: self
                .dispatcher
                .read_resource(&read.uri)
                .contents
                .into_iter()
                .map(|content| ResourceContents {
                    uri: content.uri,
                    mime_type: content.mime_type,
                    text: content.content,
                })
                .collect(),
        };
        JsonRpcResponse::success(id, json!(result))
    }

    fn list_prompts(&self, id: Value) -> JsonRpcResponse {
        let mut prompts: Vec<PromptDescriptor> = self
            .dispatcher
            .registry()
            .templates()
            .iter()
            .map(|template| {
                let schema = template.parameter_schema();
                let arguments = schema
                    .properties
                    .iter()
                    .map(|(name, property)| PromptArgument {
                        name: name.clone(),
                        description: property.description.clone(),
                        required: schema.required.iter().any(|r| r == name),
                    })
                    .collect();
                PromptDescriptor {
                    name: template.name().to_string(),
                    description: template.description().to_string(),
                    arguments,
                }
            })
            .collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        JsonRpcResponse::success(id, json!({ "prompts": prompts }))
    }

    fn get_prompt(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call: NamedCallParams = match parse_params(params) {
            Ok(call) => call,
            Err(response) => return response(id),
        };

        let envelope = self.dispatcher.render_template(&call.name, &call.arguments);
        // Rendering failures still yield a well-formed prompt result; the
        // message text carries the failure.
        let (description, text) = if envelope.success {
            let content = envelope
                .data
                .as_ref()
                .and_then(|data| data.get("content"))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            (envelope.message, content)
        } else {
            (envelope.message.clone(), envelope.message)
        };

        let result = GetPromptResult {
            description,
            messages: vec![PromptMessage {
                role: "user",
                content: TextContent::new(text),
            }],
        };
        JsonRpcResponse::success(id, json!(result))
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<Value>,
) -> Result<T, impl FnOnce(Value) -> JsonRpcResponse> {
    match serde_json::from_value(params.unwrap_or(Value::Null)) {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(move |id| {
            JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_registry;

    fn adapter() -> ProtocolAdapter {
        ProtocolAdapter::new(Arc::new(build_registry()))
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        }))
        .unwrap()
    }

    fn result_of(response: JsonRpcResponse) -> Value {
        assert!(response.error.is_none());
        response.result.unwrap()
    }

    #[test]
    fn test_initialize_reports_identity() {
        let result = result_of(adapter().handle(request("initialize", json!({}))).unwrap());
        assert_eq!(result["serverInfo"]["name"], json!(SERVER_NAME));
        assert_eq!(result["serverInfo"]["version"], json!(SERVER_VERSION));
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_notifications_get_no_response() {
        let notification: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "initialized"})).unwrap();
        assert!(adapter().handle(notification).is_none());
    }

    #[test]
    fn test_unknown_method_is_a_protocol_error() {
        let response = adapter().handle(request("tools/dance", json!({}))).unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_tools_list_contains_ping() {
        let result = result_of(adapter().handle(request("tools/list", json!({}))).unwrap());
        let tools = result["tools"].as_array().unwrap();
        assert!(tools.iter().any(|t| t["name"] == json!("ping")));
        let ping = tools.iter().find(|t| t["name"] == json!("ping")).unwrap();
        assert_eq!(ping["inputSchema"]["type"], json!("object"));
    }

    #[test]
    fn test_call_tool_renders_message_and_data() {
        let result = result_of(
            adapter()
                .handle(request("tools/call", json!({"name": "ping", "arguments": {}})))
                .unwrap(),
        );
        assert_eq!(result["isError"], json!(false));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("PONG!"));
        assert!(text.contains("\n\n{"), "pretty data appended after blank line");
    }

    #[test]
    fn test_call_unknown_tool_is_in_band_error() {
        let result = result_of(
            adapter()
                .handle(request("tools/call", json!({"name": "nope", "arguments": {}})))
                .unwrap(),
        );
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["content"][0]["text"],
            json!("Tool not found: nope")
        );
    }

    #[test]
    fn test_read_documentation_resource() {
        let result = result_of(
            adapter()
                .handle(request(
                    "resources/read",
                    json!({"uri": "mcp://factory/documentation/tools"}),
                ))
                .unwrap(),
        );
        let contents = result["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["mimeType"], json!("text/markdown"));
    }

    #[test]
    fn test_read_unmatched_uri_yields_empty_contents() {
        let result = result_of(
            adapter()
                .handle(request("resources/read", json!({"uri": "mcp://elsewhere"})))
                .unwrap(),
        );
        assert!(result["contents"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_prompts_list_flattens_arguments() {
        let result = result_of(adapter().handle(request("prompts/list", json!({}))).unwrap());
        let prompts = result["prompts"].as_array().unwrap();
        let guide = prompts
            .iter()
            .find(|p| p["name"] == json!("tool_implementation_guide"))
            .unwrap();
        let arguments = guide["arguments"].as_array().unwrap();
        assert!(arguments.iter().any(|a| a["name"] == json!("toolName")));
        assert!(arguments.iter().all(|a| a["required"] == json!(false)));
    }

    #[test]
    fn test_get_prompt_failure_stays_in_band() {
        let result = result_of(
            adapter()
                .handle(request("prompts/get", json!({"name": "nope", "arguments": {}})))
                .unwrap(),
        );
        assert_eq!(result["description"], json!("Prompt not found: nope"));
        assert_eq!(
            result["messages"][0]["content"]["text"],
            json!("Prompt not found: nope")
        );
    }

    #[test]
    fn test_malformed_params_are_invalid_params() {
        let response = adapter()
            .handle(request("tools/call", json!({"arguments": {}})))
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }
}
