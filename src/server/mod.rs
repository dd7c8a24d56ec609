//! Stdio MCP server.
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Stdout carries protocol
//! traffic only; all diagnostics go to stderr through the logger. EOF on
//! stdin is the clean shutdown signal.

pub mod adapter;
pub mod protocol;

use std::sync::Arc;

use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::capability::Capability;
use crate::plan::{
    CleanupTaskPlanner, CodeCleanupPlanner, FeatureImplementationPlanner, GeneralTaskPlanner,
    LocalDeploymentPlanner, Planner, PlannerAction,
};
use crate::registry::Registry;
use crate::resources::DocumentationProvider;
use crate::server::adapter::ProtocolAdapter;
use crate::server::protocol::{JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR};
use crate::templates::{BootstrapServerTemplate, ToolImplementationGuideTemplate};
use crate::tools::{ExplainConceptAction, PingAction};

pub const SERVER_NAME: &str = "mcp-server-factory";
pub const SERVER_VERSION: &str = "1.0.0";

/// Build the registry with every capability this server ships.
///
/// The general planner shares the same specialized planner instances that
/// are registered standalone, so a delegated plan and a direct call to the
/// specialist produce identical output.
pub fn build_registry() -> Registry {
    let mut registry = Registry::new();

    registry.register(Capability::Action(Arc::new(PingAction::new())));
    registry.register(Capability::Action(Arc::new(ExplainConceptAction::new())));

    let code_cleanup: Arc<dyn Planner> = Arc::new(CodeCleanupPlanner::new());
    let feature: Arc<dyn Planner> = Arc::new(FeatureImplementationPlanner::new());
    let general: Arc<dyn Planner> = Arc::new(GeneralTaskPlanner::new(
        Arc::clone(&code_cleanup),
        Arc::clone(&feature),
    ));

    for planner in [
        code_cleanup,
        feature,
        general,
        Arc::new(CleanupTaskPlanner::new()) as Arc<dyn Planner>,
        Arc::new(LocalDeploymentPlanner::new()) as Arc<dyn Planner>,
    ] {
        registry.register(Capability::Action(Arc::new(PlannerAction::new(planner))));
    }

    registry.register(Capability::DataProvider(Arc::new(
        DocumentationProvider::new(),
    )));

    registry.register(Capability::Template(Arc::new(
        ToolImplementationGuideTemplate::new(),
    )));
    registry.register(Capability::Template(Arc::new(BootstrapServerTemplate::new())));

    registry
}

/// The server itself: a populated adapter plus the stdio read loop.
pub struct McpServer {
    adapter: ProtocolAdapter,
}

impl McpServer {
    pub fn new() -> Self {
        Self {
            adapter: ProtocolAdapter::new(Arc::new(build_registry())),
        }
    }

    /// Serve requests until stdin closes.
    pub async fn serve(&self) -> std::io::Result<()> {
        log::info!("{} v{} listening on stdio", SERVER_NAME, SERVER_VERSION);
        self.serve_io(stdin(), stdout()).await?;
        log::info!("stdin closed, shutting down");
        Ok(())
    }

    /// The read loop itself, over arbitrary streams.
    ///
    /// One request per line, one response per line; blank lines are
    /// skipped. A line that is not JSON gets a parse-error response with a
    /// null id; JSON that is not a request envelope gets an invalid-request
    /// response, echoing the id when one is present. EOF ends the loop.
    async fn serve_io<R, W>(&self, reader: R, mut out: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<serde_json::Value>(line) {
                Err(e) => {
                    log::warn!("Unparseable request line: {}", e);
                    Some(JsonRpcResponse::failure(
                        serde_json::Value::Null,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
                Ok(value) => {
                    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
                    match serde_json::from_value::<JsonRpcRequest>(value) {
                        Ok(request) => self.adapter.handle(request),
                        Err(e) => {
                            log::warn!("Malformed request envelope: {}", e);
                            Some(JsonRpcResponse::failure(
                                id,
                                INVALID_REQUEST,
                                format!("Invalid request: {}", e),
                            ))
                        }
                    }
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                out.write_all(&encoded).await?;
                out.flush().await?;
            }
        }
        Ok(())
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::dispatch::Dispatcher;

    #[test]
    fn test_registry_contains_full_catalog() {
        let registry = build_registry();

        for tool in [
            "ping",
            "explain_concept",
            "general_task_planner",
            "code_cleanup_planner",
            "feature_implementation_planner",
            "cleanup_task",
            "local_mcp_deployment_planner",
        ] {
            assert!(registry.lookup_action(tool).is_some(), "missing tool {}", tool);
        }

        assert!(registry
            .match_provider("mcp://factory/documentation/tools")
            .is_some());
        assert!(registry.lookup_template("tool_implementation_guide").is_some());
        assert!(registry.lookup_template("bootstrap_mcp_server").is_some());
    }

    async fn serve_lines(input: &[u8]) -> Vec<serde_json::Value> {
        let mut output = Vec::new();
        McpServer::new()
            .serve_io(input, &mut output)
            .await
            .expect("serve loop");
        String::from_utf8(output)
            .expect("utf-8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("response line"))
            .collect()
    }

    #[tokio::test]
    async fn test_serve_round_trip() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","method":"ping","id":1}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"tools/list","id":2}"#,
            "\n",
        );

        let responses = serve_lines(input.as_bytes()).await;

        // The notification and the blank line produce no output.
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], serde_json::json!(1));
        assert!(responses[0]["result"].is_object());
        assert_eq!(responses[1]["id"], serde_json::json!(2));
        assert!(responses[1]["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn test_serve_distinguishes_parse_and_request_errors() {
        let input = concat!(
            "this is not json\n",
            r#"{"id":7}"#,
            "\n",
        );

        let responses = serve_lines(input.as_bytes()).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], serde_json::json!(PARSE_ERROR));
        assert!(responses[0]["id"].is_null());
        // Valid JSON without a method is a malformed envelope; the id is echoed.
        assert_eq!(
            responses[1]["error"]["code"],
            serde_json::json!(INVALID_REQUEST)
        );
        assert_eq!(responses[1]["id"], serde_json::json!(7));
    }

    #[tokio::test]
    async fn test_serve_reassembles_requests_split_across_reads() {
        let reader = tokio_test::io::Builder::new()
            .read(br#"{"jsonrpc":"2.0","me"#)
            .read(br#"thod":"ping","id":3}"#)
            .read(b"\n")
            .build();

        let mut output = Vec::new();
        McpServer::new()
            .serve_io(reader, &mut output)
            .await
            .expect("serve loop");

        let response: serde_json::Value =
            serde_json::from_str(String::from_utf8(output).unwrap().trim()).unwrap();
        assert_eq!(response["id"], serde_json::json!(3));
        assert!(response["result"].is_object());
    }

    #[test]
    fn test_general_planner_delegates_match_specialists() {
        let dispatcher = Dispatcher::new(Arc::new(build_registry()));
        let mut params = HashMap::new();
        params.insert("objective".to_string(), serde_json::json!("refactor the code"));

        let general = dispatcher.invoke_action("general_task_planner", &params);
        let specialist = dispatcher.invoke_action("code_cleanup_planner", &params);

        assert!(general.success && specialist.success);
        assert_eq!(
            general.data.unwrap()["steps"],
            specialist.data.unwrap()["steps"]
        );
    }
}
