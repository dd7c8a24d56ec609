//! Planner for code cleanup objectives.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CapabilityError;
use crate::plan::{Effort, Planner, Priority, StepMetadata, TaskPlan, TaskStep};

/// Generates a task plan for cleaning up a codebase: style, duplication,
/// naming, documentation, code smells, and performance, with a final
/// verification pass.
pub struct CodeCleanupPlanner;

impl CodeCleanupPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CodeCleanupPlanner {
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

impl Planner for CodeCleanupPlanner {
    fn name(&self) -> &str {
        "code_cleanup_planner"
    }

    fn description(&self) -> &str {
        "Generates a task plan for code cleanup objectives"
    }

    fn analyze(
        &self,
        objective: &str,
        _context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError> {
        log::info!("Analyzing code cleanup objective: {}", objective);

        let steps = vec![
            step(
                "Analyze the codebase",
                "Survey the current state of the code and build a concrete list of issues \
                 to address:\n\n\
                 1. List all source files and read through the central modules\n\
                 2. Note inconsistent style, duplicated logic, unclear names, missing \
                 documentation, long functions, and obvious hot spots\n\
                 3. Record each finding with its file and location so later steps can \
                 work from the list",
                Effort::Medium,
                Priority::High,
                &[],
            ),
            step(
                "Fix code style issues",
                "Make formatting and style consistent across the codebase:\n\n\
                 1. Fix indentation, spacing, brace placement, and import ordering\n\
                 2. Break lines that exceed the project limit\n\
                 3. Prefer running the project's formatter where one is configured, and \
                 commit the mechanical changes separately from behavioral ones",
                Effort::Medium,
                Priority::Medium,
                &["Analyze the codebase"],
            ),
            step(
                "Refactor duplicate code",
                "Remove duplicated logic found during analysis:\n\n\
                 1. Identify blocks that appear in more than one place\n\
                 2. Extract shared helpers or types and point the duplicates at them\n\
                 3. Verify the extraction preserves the original behavior at each call \
                 site",
                Effort::High,
                Priority::High,
                &["Analyze the codebase"],
            ),
            step(
                "Improve naming conventions",
                "Rename identifiers that obscure intent:\n\n\
                 1. Apply the project's conventions consistently (types, functions, \
                 constants)\n\
                 2. Replace abbreviations and single-letter names with descriptive ones\n\
                 3. Update every reference, including documentation and tests",
                Effort::Medium,
                Priority::Medium,
                &["Analyze the codebase"],
            ),
            step(
                "Add missing documentation",
                "Document the public surface and any non-obvious logic:\n\n\
                 1. Add doc comments to public types and functions, covering purpose, \
                 parameters, and failure modes\n\
                 2. Add short inline comments where the code's intent is not evident\n\
                 3. Update the README for anything user-facing that changed",
                Effort::High,
                Priority::Medium,
                &["Analyze the codebase"],
            ),
            step(
                "Fix code smells",
                "Address structural problems recorded during analysis:\n\n\
                 1. Split long functions and oversized modules\n\
                 2. Flatten deep nesting with early returns\n\
                 3. Replace sprawling conditionals with polymorphism or lookup tables \
                 where it simplifies the code",
                Effort::High,
                Priority::High,
                &["Analyze the codebase", "Refactor duplicate code"],
            ),
            step(
                "Optimize performance",
                "Address the performance issues that the analysis flagged:\n\n\
                 1. Measure before changing anything; only optimize demonstrated hot \
                 spots\n\
                 2. Remove needless allocation and repeated work in hot paths\n\
                 3. Re-measure afterwards and keep the evidence with the change",
                Effort::Medium,
                Priority::Medium,
                &["Analyze the codebase", "Fix code smells"],
            ),
            step(
                "Verify changes",
                "Confirm the cleanup did not change behavior:\n\n\
                 1. Run the full test suite and fix any regression\n\
                 2. Exercise the main entry points manually\n\
                 3. Review the final diff once more for accidental semantic changes",
                Effort::Medium,
                Priority::High,
                &[
                    "Fix code style issues",
                    "Refactor duplicate code",
                    "Improve naming conventions",
                    "Add missing documentation",
                    "Fix code smells",
                    "Optimize performance",
                ],
            ),
        ];

        let summary = "This task plan provides a systematic approach to cleaning up the \
                       codebase. It starts with analyzing the current state of the code, then \
                       addresses various aspects of code quality including style, duplication, \
                       naming, documentation, code smells, and performance. Finally, it \
                       includes a verification step to ensure that the changes don't break \
                       existing functionality.";

        Ok(TaskPlan::new(objective, steps, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_shape() {
        let plan = CodeCleanupPlanner::new()
            .analyze("Clean up the codebase", &HashMap::new())
            .unwrap();

        assert_eq!(plan.objective, "Clean up the codebase");
        assert_eq!(plan.steps.len(), 8);
        assert_eq!(plan.steps[0].description, "Analyze the codebase");
        assert!(plan.verify_dependencies().is_ok());
    }
}
