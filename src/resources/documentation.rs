//! Documentation resource provider.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::capability::{DataProvider, ResourceContent};

const URI_PATTERN: &str = "mcp://factory/documentation/([^/]+)";

// Anchored so a URI with trailing path segments does not match.
static URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^mcp://factory/documentation/([^/]+)$").expect("hard-coded pattern")
});

static TOPICS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    map.insert(
        "getting-started",
        "# Getting Started\n\n\
         This server exposes tools, resources, and prompts over the Model Context \
         Protocol.\n\n\
         ## First steps\n\n\
         1. Connect a client to the server over stdio\n\
         2. Call the `ping` tool to confirm the connection works\n\
         3. List the available tools, resources, and prompts\n\
         4. Use the `explain_concept` tool to learn about any capability type\n\n\
         ## Where to go next\n\n\
         Read `mcp://factory/documentation/tools` for the tool catalog, or the \
         `resources` and `prompts` topics for the other capability types.",
    );
    map.insert(
        "tools",
        "# Tools\n\n\
         Tools are called by name with a JSON parameter object and return a result \
         with a success flag, a message, and optional data.\n\n\
         ## Available tools\n\n\
         - `ping` -- check that the server is alive\n\
         - `explain_concept` -- explain an MCP concept\n\
         - `general_task_planner` -- plan any objective; routes code cleanup, \
         feature, and bug-fix objectives to specialized plans\n\
         - `code_cleanup_planner` -- plan a code cleanup effort\n\
         - `feature_implementation_planner` -- plan a feature implementation\n\
         - `cleanup_task` -- plan a general (non-code) cleanup\n\
         - `local_mcp_deployment_planner` -- plan a local MCP server deployment\n\n\
         Planner tools take a required `objective` string and an optional \
         `context` object, and return an ordered list of steps with effort, \
         priority, and dependency metadata.",
    );
    map.insert(
        "resources",
        "# Resources\n\n\
         Resources are read by URI. Each provider declares a URI pattern; reading \
         a URI that matches no provider returns an empty result.\n\n\
         ## Available resources\n\n\
         - `mcp://factory/documentation/{topic}` -- this documentation, one topic \
         per URI\n\n\
         Valid topics are listed under the `troubleshooting` topic; reading an \
         unknown topic returns a page that names the valid ones.",
    );
    map.insert(
        "prompts",
        "# Prompts\n\n\
         Prompts render structured text from named parameters.\n\n\
         ## Available prompts\n\n\
         - `tool_implementation_guide` -- a step-by-step guide for implementing a \
         new MCP tool, parameterized by tool name, description, and language\n\
         - `bootstrap_mcp_server` -- a walkthrough for creating a new MCP server \
         project from scratch, parameterized by server name, package name, \
         description, and build system",
    );
    map.insert(
        "troubleshooting",
        "# Troubleshooting\n\n\
         ## The client cannot connect\n\n\
         The server speaks JSON-RPC over stdio; make sure the client launches the \
         server binary directly and that nothing else writes to the server's \
         stdout. Diagnostics go to stderr.\n\n\
         ## A tool call reports failure\n\n\
         Tool failures are reported in-band: the result carries `success: false` \
         and a message naming the problem, most often a missing or invalid \
         parameter. Check the tool's input schema from the tool listing.\n\n\
         ## A resource read comes back empty\n\n\
         An empty read means no provider matched the URI. Documentation URIs have \
         the form `mcp://factory/documentation/{topic}` with no trailing \
         segments; valid topics are getting-started, tools, resources, prompts, \
         and troubleshooting.",
    );
    map
});

/// Serves markdown documentation under `mcp://factory/documentation/{topic}`.
///
/// A URI that matches the pattern but names an unknown topic still resolves;
/// the returned page lists the valid topics. Only URIs outside the pattern
/// fall through to other providers.
pub struct DocumentationProvider;

impl DocumentationProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for DocumentationProvider {
    fn uri_pattern(&self) -> &str {
        URI_PATTERN
    }

    fn description(&self) -> &str {
        "Provides documentation on MCP topics"
    }

    fn matches(&self, uri: &str) -> bool {
        URI_REGEX.is_match(uri)
    }

    fn read(&self, uri: &str) -> Option<ResourceContent> {
        let captures = URI_REGEX.captures(uri)?;
        let topic = captures.get(1)?.as_str();

        let content = match TOPICS.get(topic) {
            Some(body) => (*body).to_string(),
            None => {
                log::warn!("Unknown documentation topic requested: {}", topic);
                format!(
                    "Unknown topic: {}. Available topics: {}",
                    topic,
                    TOPICS.keys().copied().collect::<Vec<_>>().join(", ")
                )
            }
        };

        Some(ResourceContent::new(uri, "text/markdown", content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_topic() {
        let provider = DocumentationProvider::new();
        let uri = "mcp://factory/documentation/getting-started";
        assert!(provider.matches(uri));

        let content = provider.read(uri).unwrap();
        assert_eq!(content.uri, uri);
        assert_eq!(content.mime_type, "text/markdown");
        assert!(content.content.starts_with("# Getting Started"));
    }

    #[test]
    fn test_unknown_topic_resolves_to_topic_listing() {
        let provider = DocumentationProvider::new();
        let content = provider
            .read("mcp://factory/documentation/nonsense")
            .unwrap();
        assert!(content.content.starts_with("Unknown topic: nonsense"));
        assert!(content.content.contains("getting-started"));
    }

    #[test]
    fn test_non_matching_uris_fall_through() {
        let provider = DocumentationProvider::new();
        assert!(!provider.matches("mcp://factory/other/thing"));
        assert!(!provider.matches("mcp://factory/documentation/tools/extra"));
        assert!(provider.read("mcp://factory/other/thing").is_none());
    }

    #[test]
    fn test_every_topic_has_content() {
        let provider = DocumentationProvider::new();
        for topic in TOPICS.keys() {
            let uri = format!("mcp://factory/documentation/{}", topic);
            let content = provider.read(&uri).unwrap();
            assert!(content.content.starts_with("# "), "topic {}", topic);
        }
    }
}
