//! Server bootstrap walkthrough template.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::capability::{Template, TemplateResponse};
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

const BUILD_SYSTEMS: &[&str] = &["detect", "maven", "gradle"];

/// Renders a walkthrough for creating a new MCP server project from
/// scratch. The `buildSystem` parameter defaults to `detect`, which tells
/// the reader to pick whichever build system the surrounding workspace
/// already uses.
pub struct BootstrapServerTemplate;

impl BootstrapServerTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BootstrapServerTemplate {
    fn default() -> Self {
        Self::new()
    }
}

fn build_system_section(build_system: &str) -> &'static str {
    match build_system {
        "maven" => {
            "Set up a Maven project:\n\n\
             1. Create a `pom.xml` declaring the MCP server SDK dependency\n\
             2. Configure the shade or assembly plugin to produce a runnable jar\n\
             3. Verify `mvn package` builds a jar that starts from the command line"
        }
        "gradle" => {
            "Set up a Gradle project:\n\n\
             1. Create `build.gradle` declaring the MCP server SDK dependency\n\
             2. Apply the application plugin and set the main class\n\
             3. Verify `gradle build` produces a distribution that starts from the \
             command line"
        }
        _ => {
            "Detect the build system:\n\n\
             1. If the workspace already uses Maven or Gradle, follow that \
             convention\n\
             2. Otherwise prefer the build system your team maintains elsewhere\n\
             3. Either way, the build must produce an artifact a client can launch \
             with a single command"
        }
    }
}

impl Template for BootstrapServerTemplate {
    fn name(&self) -> &str {
        "bootstrap_mcp_server"
    }

    fn description(&self) -> &str {
        "A walkthrough for creating a new MCP server project"
    }

    fn parameter_schema(&self) -> ParameterSchema {
        ParameterSchema::object()
            .with_property(
                "serverName",
                ParameterSchema::string("The name of the MCP server"),
            )
            .with_property(
                "packageName",
                ParameterSchema::string("The package or namespace for the server code"),
            )
            .with_property(
                "description",
                ParameterSchema::string("What the server is for"),
            )
            .with_property(
                "buildSystem",
                ParameterSchema::string_enum(
                    "The build system to use",
                    BUILD_SYSTEMS.iter().copied(),
                ),
            )
    }

    fn render(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<TemplateResponse, CapabilityError> {
        let server_name = parameters
            .get("serverName")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("my-mcp-server");
        let package_name = parameters
            .get("packageName")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("com.example.mcp");
        let description = parameters
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("(describe what the server is for)");
        let build_system = match parameters.get("buildSystem").and_then(Value::as_str) {
            Some(bs) if !bs.is_empty() => {
                let bs = bs.to_lowercase();
                if !BUILD_SYSTEMS.contains(&bs.as_str()) {
                    return Err(CapabilityError::InvalidParameter {
                        name: "buildSystem".to_string(),
                        reason: format!("must be one of: {}", BUILD_SYSTEMS.join(", ")),
                    });
                }
                bs
            }
            _ => "detect".to_string(),
        };

        let content = format!(
            "# Bootstrapping the `{server_name}` MCP Server\n\n\
             Purpose: {description}\n\
             Package: `{package_name}`\n\
             Build system: {build_system}\n\n\
             ## 1. Create the project\n\n\
             Create a new project named `{server_name}` with its code under \
             `{package_name}`. Keep the server in its own module so the MCP \
             plumbing stays separate from the capabilities it exposes.\n\n\
             ## 2. Configure the build\n\n\
             {build_section}\n\n\
             ## 3. Wire up the server\n\n\
             1. Implement the stdio transport: read JSON-RPC requests from \
             stdin, write responses to stdout, and keep all logging on stderr\n\
             2. Handle `initialize` by reporting the server name \
             (`{server_name}`), version, and capability flags\n\
             3. Register at least one tool so the server is immediately \
             testable; a `ping` tool is the conventional starting point\n\n\
             ## 4. Add capabilities\n\n\
             1. Add tools for the actions the server should perform\n\
             2. Add resources for content clients should be able to read by URI\n\
             3. Add prompts for reusable parameterized text\n\n\
             ## 5. Verify\n\n\
             1. Launch the server from a client and complete the initialization \
             handshake\n\
             2. Call each tool, read each resource, and render each prompt once\n\
             3. Check the server shuts down cleanly when the client closes stdin",
            build_section = build_system_section(&build_system),
        );

        let metadata = HashMap::from([
            ("serverName".to_string(), json!(server_name)),
            ("buildSystem".to_string(), json!(build_system)),
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
            ("serverName".to_string(), json!("weather-server")),
            ("packageName".to_string(), json!("dev.example.weather")),
            ("description".to_string(), json!("Serves forecasts")),
            ("buildSystem".to_string(), json!("gradle")),
        ]);
        let response = BootstrapServerTemplate::new().render(&params).unwrap();
        assert!(response.content.contains("`weather-server`"));
        assert!(response.content.contains("`dev.example.weather`"));
        assert!(response.content.contains("build.gradle"));
        assert_eq!(response.metadata.unwrap()["buildSystem"], json!("gradle"));
    }

    #[test]
    fn test_build_system_defaults_to_detect() {
        let response = BootstrapServerTemplate::new().render(&HashMap::new()).unwrap();
        assert!(response.content.contains("Build system: detect"));
        assert!(response.content.contains("Detect the build system"));
    }

    #[test]
    fn test_unknown_build_system_is_rejected() {
        let params = HashMap::from([("buildSystem".to_string(), json!("bazel"))]);
        let err = BootstrapServerTemplate::new().render(&params).unwrap_err();
        assert!(err.to_string().contains("buildSystem"));
    }

    #[test]
    fn test_schema_enumerates_build_systems() {
        let schema = BootstrapServerTemplate::new().parameter_schema();
        assert!(schema.validate().is_ok());
        assert_eq!(
            schema.properties["buildSystem"].enum_values.as_ref().unwrap().len(),
            BUILD_SYSTEMS.len()
        );
    }
}
