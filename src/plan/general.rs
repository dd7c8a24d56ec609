//! Classifying planner for general objectives.
//!
//! Inspects a free-text objective, classifies it against an ordered set of
//! patterns, and delegates to a more specific planner; falls back to a
//! generic plan when nothing matches. The patterns are pragmatic, low-cost
//! heuristics, not an exhaustive categorizer: ambiguous objectives silently
//! fall through to the generic branch.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::CapabilityError;
use crate::plan::{Effort, Planner, Priority, StepMetadata, TaskPlan, TaskStep};

// Anchored full-string matches. `.` does not cross newlines, so a multiline
// objective only classifies when a single line satisfies the whole pattern.
static CODE_CLEANUP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*(clean|refactor|improve|optimize|fix).*code.*$")
        .expect("hard-coded pattern")
});
static FEATURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*(implement|add|create|develop).*feature.*$").expect("hard-coded pattern")
});
static BUG_FIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*(fix|resolve|debug|troubleshoot).*bug.*$").expect("hard-coded pattern")
});

/// Meta-planner that routes objectives to specific planners by pattern.
///
/// Evaluation order is fixed: code cleanup, feature implementation, bug fix,
/// generic fallback; the first matching pattern wins. Delegates are the same
/// planner instances the registry owns, injected at construction.
pub struct GeneralTaskPlanner {
    code_cleanup: Arc<dyn Planner>,
    feature: Arc<dyn Planner>,
}

impl GeneralTaskPlanner {
    /// Create the planner with its delegate instances.
    pub fn new(code_cleanup: Arc<dyn Planner>, feature: Arc<dyn Planner>) -> Self {
        Self {
            code_cleanup,
            feature,
        }
    }

    fn bug_fix_plan(&self, objective: &str) -> TaskPlan {
        let steps = vec![
            step(
                "Reproduce the bug",
                "Reproduce the bug to understand its behavior:\n\n\
                 1. Identify the steps that trigger it\n\
                 2. Record the expected versus actual behavior\n\
                 3. Capture error messages and logs\n\
                 4. Note the conditions under which it occurs",
                Effort::Medium,
                Priority::High,
                &[],
            ),
            step(
                "Analyze the bug",
                "Find the root cause:\n\n\
                 1. Read the code on the failing path\n\
                 2. Trace the execution to the point where behavior diverges\n\
                 3. Distinguish the root cause from its symptoms\n\
                 4. Consider candidate fixes and their side effects",
                Effort::High,
                Priority::High,
                &["Reproduce the bug"],
            ),
            step(
                "Fix the bug",
                "Implement the fix:\n\n\
                 1. Make the smallest change that addresses the root cause\n\
                 2. Do not paper over symptoms\n\
                 3. Watch for side effects on neighboring behavior",
                Effort::Medium,
                Priority::High,
                &["Analyze the bug"],
            ),
            step(
                "Test the fix",
                "Verify the fix:\n\n\
                 1. Confirm the original reproduction no longer fails\n\
                 2. Add a regression test that captures the bug\n\
                 3. Run the full suite to catch regressions elsewhere",
                Effort::Medium,
                Priority::High,
                &["Fix the bug"],
            ),
            step(
                "Document the fix",
                "Record what happened:\n\n\
                 1. Explain the root cause and the fix where future readers will look\n\
                 2. Update any documentation the bug proved wrong\n\
                 3. Note lessons that would prevent a recurrence",
                Effort::Low,
                Priority::Medium,
                &["Test the fix"],
            ),
        ];

        let summary = "This task plan provides a systematic approach to fixing a bug. It \
                       starts with reproducing and analyzing the bug, then moves on to \
                       implementing a fix, testing the fix, and documenting the changes.";

        TaskPlan::new(objective, steps, summary)
    }

    fn generic_plan(&self, objective: &str) -> TaskPlan {
        let steps = vec![
            step(
                "Analyze the objective",
                "Understand what needs to be accomplished:\n\n\
                 1. Restate the objective in concrete terms\n\
                 2. Break it into manageable parts\n\
                 3. Identify requirements, constraints, and prerequisites\n\
                 4. Define what success looks like",
                Effort::Medium,
                Priority::High,
                &[],
            ),
            step(
                "Research and gather information",
                "Collect what the work needs:\n\n\
                 1. Explore the relevant code, documentation, and prior art\n\
                 2. Fill the gaps identified during analysis\n\
                 3. Organize findings so the planning step can use them",
                Effort::Medium,
                Priority::High,
                &["Analyze the objective"],
            ),
            step(
                "Plan the approach",
                "Decide how to proceed:\n\n\
                 1. Lay out the concrete steps and their order\n\
                 2. Note the tools and resources each step needs\n\
                 3. Identify risks and how to mitigate them",
                Effort::Medium,
                Priority::High,
                &["Research and gather information"],
            ),
            step(
                "Implement the solution",
                "Carry out the plan:\n\n\
                 1. Work through the planned steps, checking results as you go\n\
                 2. Adapt the plan when new information contradicts it\n\
                 3. Keep track of progress and open issues",
                Effort::High,
                Priority::High,
                &["Plan the approach"],
            ),
            step(
                "Test and verify",
                "Confirm the objective is met:\n\n\
                 1. Test the result against the success criteria\n\
                 2. Check for regressions and side effects\n\
                 3. Address anything found before calling the work done",
                Effort::Medium,
                Priority::High,
                &["Implement the solution"],
            ),
            step(
                "Document the changes",
                "Leave a record:\n\n\
                 1. Document what changed and why\n\
                 2. Update user-facing documentation where relevant\n\
                 3. Note known limitations and follow-ups",
                Effort::Medium,
                Priority::Medium,
                &["Test and verify"],
            ),
        ];

        let summary = "This task plan provides a general approach to accomplishing the \
                       objective. It starts with analyzing the objective and gathering \
                       information, then moves on to planning, implementation, testing, \
                       and documentation.";

        TaskPlan::new(objective, steps, summary)
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

impl Planner for GeneralTaskPlanner {
    fn name(&self) -> &str {
        "general_task_planner"
    }

    fn description(&self) -> &str {
        "Generates a task plan for general objectives"
    }

    fn analyze(
        &self,
        objective: &str,
        context: &HashMap<String, Value>,
    ) -> Result<TaskPlan, CapabilityError> {
        log::info!("Analyzing general objective: {}", objective);

        if CODE_CLEANUP_PATTERN.is_match(objective) {
            log::info!("Categorized as code cleanup objective");
            self.code_cleanup.analyze(objective, context)
        } else if FEATURE_PATTERN.is_match(objective) {
            log::info!("Categorized as feature implementation objective");
            self.feature.analyze(objective, context)
        } else if BUG_FIX_PATTERN.is_match(objective) {
            log::info!("Categorized as bug fix objective");
            Ok(self.bug_fix_plan(objective))
        } else {
            log::info!("Using generic task plan");
            Ok(self.generic_plan(objective))
        }
    }
}
