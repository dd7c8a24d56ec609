//! The executable capability kind.

use std::collections::HashMap;

use serde_json::Value;

use crate::capability::ResultEnvelope;
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

/// A named, invocable capability that performs a computation and returns a
/// result.
///
/// Implementations are synchronous, local, and side-effect-bounded; they must
/// not mutate registry contents. An `Err` from [`execute`](Self::execute) is
/// an execution fault — the dispatcher converts it into a failure envelope,
/// so implementations are free to use `?` internally.
pub trait Action: Send + Sync {
    /// Unique name of the action within its kind.
    fn name(&self) -> &str;

    /// Description used to tell callers how/when/why to invoke the action.
    fn description(&self) -> &str;

    /// Schema of the parameters the action accepts.
    fn input_schema(&self) -> ParameterSchema;

    /// Schema of the action's result, when one is declared.
    fn output_schema(&self) -> Option<ParameterSchema> {
        None
    }

    /// Execute the action with the given parameters.
    fn execute(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<ResultEnvelope, CapabilityError>;
}
