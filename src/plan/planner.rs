//! The shared planner contract and its action wrapper.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::capability::{Action, ResultEnvelope};
use crate::error::CapabilityError;
use crate::plan::TaskPlan;
use crate::schema::ParameterSchema;

/// A planning algorithm: analyzes a high-level objective and produces a
/// task plan.
///
/// Planners do not shape protocol responses; [`PlannerAction`] adapts any
/// planner to the uniform [`Action`] execution contract. Every plan returned
/// must be non-empty with dependency references resolvable to earlier steps.
pub trait Planner: Send + Sync {
    /// Unique name, used as the wrapping action's name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Analyze the objective and generate a task plan.
    fn analyze(
        &self,
        objective: &str,
        context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError>;
}

/// Adapts a [`Planner`] to the uniform action execution contract.
///
/// Performs the shared behavior of every planner-style action: validates the
/// `objective` parameter (absence or empty string is a terminal, local
/// failure with no partial plan), extracts the optional `context` map,
/// delegates to the planner, and converts any planning fault into a failure
/// envelope.
pub struct PlannerAction {
    planner: Arc<dyn Planner>,
}

impl PlannerAction {
    /// Wrap an already-constructed planner instance.
    pub fn new(planner: Arc<dyn Planner>) -> Self {
        Self { planner }
    }

    fn extract_context(parameters: &HashMap<String, Value>) -> HashMap<String, Value> {
        parameters
            .get("context")
            .and_then(Value::as_object)
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }
}

impl Action for PlannerAction {
    fn name(&self) -> &str {
        self.planner.name()
    }

    fn description(&self) -> &str {
        self.planner.description()
    }

    fn input_schema(&self) -> ParameterSchema {
        ParameterSchema::object()
            .with_property(
                "objective",
                ParameterSchema::string("The high-level objective to analyze"),
            )
            .with_property(
                "context",
                ParameterSchema::object()
                    .with_description("Additional context for the task planning"),
            )
            .with_required(["objective"])
    }

    fn output_schema(&self) -> Option<ParameterSchema> {
        let step = ParameterSchema::object()
            .with_property(
                "description",
                ParameterSchema::string("A short description of the step"),
            )
            .with_property(
                "instruction",
                ParameterSchema::string("Detailed instructions for completing the step"),
            )
            .with_property(
                "metadata",
                ParameterSchema::object()
                    .with_description("Effort, priority, and dependency metadata"),
            )
            .with_required(["description", "instruction", "metadata"]);

        let plan = ParameterSchema::object()
            .with_description("The generated task plan")
            .with_property(
                "objective",
                ParameterSchema::string("The original high-level objective"),
            )
            .with_property("summary", ParameterSchema::string("A summary of the task plan"))
            .with_property(
                "steps",
                ParameterSchema::array("The actionable steps to accomplish the objective", step),
            )
            .with_required(["objective", "summary", "steps"]);

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
                .with_property("data", plan)
                .with_required(["success", "message", "data"]),
        )
    }

    fn execute(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<ResultEnvelope, CapabilityError> {
        let objective = match parameters.get("objective").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Ok(ResultEnvelope::failure(
                    "Missing required parameter: objective",
                ))
            }
        };
        let context = Self::extract_context(parameters);

        log::info!("Executing task planner: {}", self.planner.name());
        let plan = match self.planner.analyze(objective, &context) {
            Ok(plan) => plan,
            Err(e) => {
                log::warn!("Failed to generate task plan: {}", e);
                return Ok(ResultEnvelope::failure(format!(
                    "Failed to generate task plan: {}",
                    e
                )));
            }
        };

        Ok(ResultEnvelope::ok_encoding(
            "Task plan generated successfully",
            &json!({
                "objective": plan.objective,
                "summary": plan.summary,
                "steps": plan.steps,
                "detailedSummary": plan.detailed_summary(),
            }),
        ))
    }
}
