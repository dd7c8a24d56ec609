//! Planner for local MCP server deployment objectives.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CapabilityError;
use crate::plan::{Effort, Planner, Priority, StepMetadata, TaskPlan, TaskStep};

/// Generates a task plan for building, packaging, and deploying an MCP
/// server to the local machine and registering it with a client.
///
/// The build-and-deploy tail of the chain is marked critical: a failure
/// there means the deployed server would not be usable, so the plan advises
/// aborting rather than continuing.
pub struct LocalDeploymentPlanner;

impl LocalDeploymentPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalDeploymentPlanner {
    fn default() -> Self {
        Self::new()
    }
}

fn step(
    description: &str,
    instruction: &str,
    effort: Effort,
    priority: Priority,
    dependencies: &[&str],
    critical: bool,
) -> TaskStep {
    let mut metadata = StepMetadata::new(effort, priority, dependencies.iter().copied());
    if critical {
        metadata = metadata.critical();
    }
    TaskStep::new(description, instruction, metadata)
}

impl Planner for LocalDeploymentPlanner {
    fn name(&self) -> &str {
        "local_mcp_deployment_planner"
    }

    fn description(&self) -> &str {
        "Generates a task plan for deploying local MCP servers"
    }

    fn analyze(
        &self,
        objective: &str,
        _context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError> {
        log::info!("Analyzing local MCP deployment objective: {}", objective);

        let steps = vec![
            step(
                "Clean the project",
                "Start from a known-clean state:\n\n\
                 1. Remove previous build outputs and stale artifacts\n\
                 2. Make sure the working tree has no uncommitted changes you did not \
                 intend to ship",
                Effort::Low,
                Priority::High,
                &[],
                false,
            ),
            step(
                "Build the project",
                "Compile the server from the clean state:\n\n\
                 1. Run the project's build command\n\
                 2. Treat any warning that points at broken functionality as a blocker\n\
                 3. Do not continue with a partially successful build",
                Effort::Medium,
                Priority::Critical,
                &["Clean the project"],
                true,
            ),
            step(
                "Run tests",
                "Validate the build before it goes anywhere:\n\n\
                 1. Run the full test suite against the fresh build\n\
                 2. A deployment with failing tests is not a deployment candidate; fix \
                 first, then rebuild",
                Effort::Medium,
                Priority::Critical,
                &["Build the project"],
                true,
            ),
            step(
                "Package the project",
                "Produce the deployable artifact:\n\n\
                 1. Package the server in the form the client launches (binary, archive, \
                 or script)\n\
                 2. Verify the artifact starts on its own before installing it anywhere",
                Effort::Medium,
                Priority::Critical,
                &["Run tests"],
                true,
            ),
            step(
                "Deploy the MCP server",
                "Install the artifact on the local machine:\n\n\
                 1. Copy the artifact to its installation directory\n\
                 2. Make sure the launch command, working directory, and environment \
                 variables it needs are all in place",
                Effort::Medium,
                Priority::Critical,
                &["Package the project"],
                true,
            ),
            step(
                "Update MCP settings",
                "Register the server with the MCP client:\n\n\
                 1. Add or update the server entry in the client's MCP settings file, \
                 pointing at the deployed launch command\n\
                 2. Restart or reload the client so it picks up the new configuration",
                Effort::Low,
                Priority::Critical,
                &["Deploy the MCP server"],
                true,
            ),
            step(
                "Verify the deployment",
                "Confirm the client can actually talk to the server:\n\n\
                 1. From the client, call the server's ping tool and check for a \
                 successful response\n\
                 2. List the server's tools, resources, and prompts and spot-check one \
                 of each",
                Effort::Low,
                Priority::Critical,
                &["Update MCP settings"],
                true,
            ),
        ];

        let summary = "This task plan walks through deploying an MCP server locally: clean, \
                       build, test, package, deploy, register the server with the MCP \
                       client, and verify the deployment end to end. The build-and-deploy \
                       steps are critical; a failure in any of them should abort the \
                       deployment.";

        Ok(TaskPlan::new(objective, steps, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = LocalDeploymentPlanner::new()
            .analyze("Deploy the server locally", &HashMap::new())
            .unwrap();

        assert_eq!(plan.steps.len(), 7);
        assert_eq!(plan.steps[0].description, "Clean the project");
        assert!(plan.verify_dependencies().is_ok());
    }

    #[test]
    fn test_critical_tail_is_flagged() {
        let plan = LocalDeploymentPlanner::new()
            .analyze("Deploy", &HashMap::new())
            .unwrap();

        assert_eq!(plan.steps[0].metadata.is_critical, None);
        for step in &plan.steps[1..] {
            assert_eq!(step.metadata.is_critical, Some(true));
            assert_eq!(step.metadata.abort_on_failure, Some(true));
        }
    }
}
