//! Planner for feature implementation objectives.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CapabilityError;
use crate::plan::{Effort, Planner, Priority, StepMetadata, TaskPlan, TaskStep};

/// Generates a task plan for implementing a new feature, from requirements
/// analysis through review.
pub struct FeatureImplementationPlanner;

impl FeatureImplementationPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeatureImplementationPlanner {
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
) -> TaskStep {
    TaskStep::new(
        description,
        instruction,
        StepMetadata::new(effort, priority, dependencies.iter().copied()),
    )
}

impl Planner for FeatureImplementationPlanner {
    fn name(&self) -> &str {
        "feature_implementation_planner"
    }

    fn description(&self) -> &str {
        "Generates a task plan for feature implementation objectives"
    }

    fn analyze(
        &self,
        objective: &str,
        _context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError> {
        log::info!("Analyzing feature implementation objective: {}", objective);

        let steps = vec![
            step(
                "Analyze requirements",
                "Pin down what the feature must do before writing any code:\n\n\
                 1. State the feature in concrete terms: inputs, outputs, and user-visible \
                 behavior\n\
                 2. Identify constraints, edge cases, and interactions with existing \
                 functionality\n\
                 3. Define acceptance criteria that the finished feature must satisfy",
                Effort::Medium,
                Priority::High,
                &[],
            ),
            step(
                "Design the feature",
                "Decide how the feature fits into the existing architecture:\n\n\
                 1. Choose where the new code lives and which existing seams it plugs \
                 into\n\
                 2. Sketch the data model and public interface\n\
                 3. Note any schema, configuration, or protocol changes the feature \
                 requires",
                Effort::Medium,
                Priority::High,
                &["Analyze requirements"],
            ),
            step(
                "Implement the feature",
                "Build the feature according to the design:\n\n\
                 1. Implement the core logic first, behind the designed interface\n\
                 2. Keep changes to existing code minimal and deliberate\n\
                 3. Compile and run frequently; adjust the design if reality disagrees \
                 with it",
                Effort::High,
                Priority::High,
                &["Design the feature"],
            ),
            step(
                "Write tests",
                "Cover the feature with tests derived from the acceptance criteria:\n\n\
                 1. Unit-test the core logic, including the edge cases from the analysis \
                 step\n\
                 2. Add an integration test exercising the feature end to end\n\
                 3. Make sure the new tests fail when the feature is broken",
                Effort::Medium,
                Priority::High,
                &["Implement the feature"],
            ),
            step(
                "Integrate with existing code",
                "Wire the feature into the rest of the system:\n\n\
                 1. Connect the feature to its callers, configuration, and startup path\n\
                 2. Run the full test suite to catch regressions\n\
                 3. Resolve conflicts with existing behavior found during integration",
                Effort::Medium,
                Priority::High,
                &["Implement the feature", "Write tests"],
            ),
            step(
                "Document the feature",
                "Document what was built:\n\n\
                 1. Add doc comments on the new public surface\n\
                 2. Update the README or user guide with usage and configuration\n\
                 3. Record any limitations or follow-up work",
                Effort::Medium,
                Priority::Medium,
                &["Implement the feature"],
            ),
            step(
                "Review and refine",
                "Give the finished feature a final pass:\n\n\
                 1. Re-read the diff against the acceptance criteria\n\
                 2. Simplify anything that grew convoluted during implementation\n\
                 3. Confirm tests, integration, and documentation are all consistent \
                 with the final shape of the code",
                Effort::Medium,
                Priority::High,
                &[
                    "Implement the feature",
                    "Write tests",
                    "Integrate with existing code",
                    "Document the feature",
                ],
            ),
        ];

        let summary = "This task plan provides a structured approach to implementing a new \
                       feature. It starts with analyzing requirements and designing the \
                       feature, then moves through implementation, testing, and integration, \
                       and finishes with documentation and a review pass.";

        Ok(TaskPlan::new(objective, steps, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = FeatureImplementationPlanner::new()
            .analyze("Implement a new feature", &HashMap::new())
            .unwrap();

        assert_eq!(plan.steps.len(), 7);
        assert_eq!(plan.steps[0].description, "Analyze requirements");
        assert!(plan.verify_dependencies().is_ok());
    }
}
