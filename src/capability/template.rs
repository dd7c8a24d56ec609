//! The response-generating capability kind.

use std::collections::HashMap;

use serde_json::Value;

use crate::capability::TemplateResponse;
use crate::error::CapabilityError;
use crate::schema::ParameterSchema;

/// A capability that generates templated text from named parameters.
///
/// Treated identically to an [`Action`](crate::capability::Action) for
/// dispatch purposes, differing only in response shaping.
pub trait Template: Send + Sync {
    /// Unique name of the template within its kind.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Schema of the parameters the template accepts.
    fn parameter_schema(&self) -> ParameterSchema;

    /// Render the template with the given parameters.
    fn render(
        &self,
        parameters: &HashMap<String, Value>,
    ) -> Result<TemplateResponse, CapabilityError>;
}
