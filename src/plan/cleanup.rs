//! Planner for general cleanup objectives.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CapabilityError;
use crate::plan::{Effort, Planner, Priority, StepMetadata, TaskPlan, TaskStep};

/// Generates a task plan for cleanup objectives that are not specifically
/// about code: stale artifacts, unused dependencies, leftover configuration.
pub struct CleanupTaskPlanner;

impl CleanupTaskPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CleanupTaskPlanner {
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

impl Planner for CleanupTaskPlanner {
    fn name(&self) -> &str {
        "cleanup_task"
    }

    fn description(&self) -> &str {
        "Generates a task plan for cleanup objectives"
    }

    fn analyze(
        &self,
        objective: &str,
        _context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError> {
        log::info!("Analyzing cleanup objective: {}", objective);

        let steps = vec![
            step(
                "Analyze the current state",
                "Take stock of what exists before removing anything:\n\n\
                 1. Inventory the files, dependencies, and configuration in scope\n\
                 2. Note what is actively used versus what appears abandoned\n\
                 3. Record anything whose status is unclear for closer inspection",
                Effort::Medium,
                Priority::High,
                &[],
            ),
            step(
                "Identify items to clean up",
                "Turn the inventory into a concrete removal list:\n\n\
                 1. Confirm each suspected-unused item really has no remaining \
                 references\n\
                 2. Separate safe deletions from ones needing a migration or \
                 deprecation period\n\
                 3. Write down the rationale for each item on the list",
                Effort::Medium,
                Priority::High,
                &["Analyze the current state"],
            ),
            step(
                "Prioritize cleanup tasks",
                "Order the list by value and risk:\n\n\
                 1. Do high-value, low-risk removals first\n\
                 2. Batch related items so each change is reviewable on its own\n\
                 3. Defer anything blocked on other work, and note the blocker",
                Effort::Low,
                Priority::Medium,
                &["Identify items to clean up"],
            ),
            step(
                "Execute cleanup tasks",
                "Work through the prioritized list:\n\n\
                 1. Remove items one batch at a time, keeping each change small\n\
                 2. Run builds and tests after every batch\n\
                 3. Stop and reassess if a removal breaks something unexpected",
                Effort::High,
                Priority::High,
                &["Prioritize cleanup tasks"],
            ),
            step(
                "Verify cleanup",
                "Confirm nothing needed was lost:\n\n\
                 1. Run the full test suite and the main entry points\n\
                 2. Check that builds are reproducible from a clean checkout\n\
                 3. Review the final state against the original removal list",
                Effort::Medium,
                Priority::High,
                &["Execute cleanup tasks"],
            ),
        ];

        let summary = "This task plan provides a careful approach to cleanup work. It \
                       starts by analyzing the current state and identifying what can go, \
                       prioritizes the removals by value and risk, then executes them in \
                       small verified batches with a final verification pass.";

        Ok(TaskPlan::new(objective, steps, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = CleanupTaskPlanner::new()
            .analyze("Clean out old artifacts", &HashMap::new())
            .unwrap();

        assert_eq!(plan.steps.len(), 5);
        assert_eq!(plan.steps[0].description, "Analyze the current state");
        assert!(plan.verify_dependencies().is_ok());
    }
}
