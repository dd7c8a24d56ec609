//! Task plan model and planner capabilities.
//!
//! Planner-style actions analyze a free-text objective and produce a
//! [`TaskPlan`]: an ordered sequence of steps with inter-step dependency
//! metadata. Plans are constructed fresh per invocation and never persisted
//! or mutated after return.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cleanup;
pub mod code_cleanup;
pub mod deployment;
pub mod feature;
pub mod general;
pub mod planner;

pub use cleanup::CleanupTaskPlanner;
pub use code_cleanup::CodeCleanupPlanner;
pub use deployment::LocalDeploymentPlanner;
pub use feature::FeatureImplementationPlanner;
pub use general::GeneralTaskPlanner;
pub use planner::{Planner, PlannerAction};

/// Estimated effort for a task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// Priority of a task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Typed metadata attached to a task step.
///
/// `dependencies` lists the `description` values of steps that must already
/// appear earlier in the plan. `is_critical` and `abort_on_failure` are
/// advisory: they signal that failure of the step conceptually halts the
/// whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    #[serde(rename = "estimatedEffort")]
    pub estimated_effort: Effort,
    pub priority: Priority,
    pub dependencies: Vec<String>,
    #[serde(rename = "isCritical", skip_serializing_if = "Option::is_none")]
    pub is_critical: Option<bool>,
    #[serde(rename = "abortOnFailure", skip_serializing_if = "Option::is_none")]
    pub abort_on_failure: Option<bool>,
}

impl StepMetadata {
    /// Metadata with the given effort, priority, and dependency list.
    pub fn new<I, S>(estimated_effort: Effort, priority: Priority, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            estimated_effort,
            priority,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            is_critical: None,
            abort_on_failure: None,
        }
    }

    /// Mark the step as critical: its failure conceptually aborts the plan.
    pub fn critical(mut self) -> Self {
        self.is_critical = Some(true);
        self.abort_on_failure = Some(true);
        self
    }
}

/// A single step in a task plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStep {
    /// Short description, unique within a plan; doubles as the
    /// dependency-reference key.
    pub description: String,
    /// Long-form instructions for completing the step.
    pub instruction: String,
    /// Effort, priority, and dependency metadata.
    pub metadata: StepMetadata,
}

impl TaskStep {
    pub fn new(
        description: impl Into<String>,
        instruction: impl Into<String>,
        metadata: StepMetadata,
    ) -> Self {
        Self {
            description: description.into(),
            instruction: instruction.into(),
            metadata,
        }
    }
}

/// Structural defects in a task plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan contains no steps")]
    Empty,

    #[error("duplicate step description: '{0}'")]
    DuplicateStep(String),

    #[error("step '{step}' depends on '{dependency}', which does not appear earlier in the plan")]
    UnresolvedDependency { step: String, dependency: String },
}

/// An ordered task plan produced by a planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    /// The original objective, unmodified.
    pub objective: String,
    /// Steps in execution order.
    pub steps: Vec<TaskStep>,
    /// Summary of the overall approach.
    pub summary: String,
}

impl TaskPlan {
    pub fn new(
        objective: impl Into<String>,
        steps: Vec<TaskStep>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            objective: objective.into(),
            steps,
            summary: summary.into(),
        }
    }

    /// Check that the plan is non-empty, step descriptions are unique, and
    /// every dependency refers to a step appearing earlier in the sequence.
    pub fn verify_dependencies(&self) -> Result<(), PlanError> {
        if self.steps.is_empty() {
            return Err(PlanError::Empty);
        }
        let mut seen: Vec<&str> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if seen.contains(&step.description.as_str()) {
                return Err(PlanError::DuplicateStep(step.description.clone()));
            }
            for dependency in &step.metadata.dependencies {
                if !seen.contains(&dependency.as_str()) {
                    return Err(PlanError::UnresolvedDependency {
                        step: step.description.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
            seen.push(&step.description);
        }
        Ok(())
    }

    /// Numbered, human-readable recap of the plan.
    pub fn detailed_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Objective: {}\n\n", self.objective));
        out.push_str(&format!("Summary: {}\n\n", self.summary));
        out.push_str("Steps:\n");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(description: &str, dependencies: &[&str]) -> TaskStep {
        TaskStep::new(
            description,
            "do it",
            StepMetadata::new(Effort::Medium, Priority::High, dependencies.iter().copied()),
        )
    }

    #[test]
    fn test_linear_chain_verifies() {
        let plan = TaskPlan::new(
            "objective",
            vec![step("a", &[]), step("b", &["a"]), step("c", &["b"])],
            "summary",
        );
        assert!(plan.verify_dependencies().is_ok());
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let plan = TaskPlan::new(
            "objective",
            vec![step("a", &["b"]), step("b", &[])],
            "summary",
        );
        assert_eq!(
            plan.verify_dependencies(),
            Err(PlanError::UnresolvedDependency {
                step: "a".to_string(),
                dependency: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let plan = TaskPlan::new("objective", vec![step("a", &["ghost"])], "summary");
        assert!(matches!(
            plan.verify_dependencies(),
            Err(PlanError::UnresolvedDependency { .. })
        ));
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let plan = TaskPlan::new("objective", vec![], "summary");
        assert_eq!(plan.verify_dependencies(), Err(PlanError::Empty));
    }

    #[test]
    fn test_duplicate_descriptions_are_rejected() {
        let plan = TaskPlan::new(
            "objective",
            vec![step("a", &[]), step("a", &[])],
            "summary",
        );
        assert_eq!(
            plan.verify_dependencies(),
            Err(PlanError::DuplicateStep("a".to_string()))
        );
    }

    #[test]
    fn test_metadata_serializes_with_wire_field_names() {
        let metadata = StepMetadata::new(Effort::Low, Priority::Critical, ["a"]).critical();
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["estimatedEffort"], "Low");
        assert_eq!(value["priority"], "Critical");
        assert_eq!(value["isCritical"], true);
        assert_eq!(value["abortOnFailure"], true);
    }
}
