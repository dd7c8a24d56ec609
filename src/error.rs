//! Error types shared across the capability layer.

use thiserror::Error;

/// Errors raised inside a capability's own logic.
///
/// These never cross the dispatch boundary: the [`Dispatcher`](crate::dispatch::Dispatcher)
/// converts every variant into a failure [`ResultEnvelope`](crate::capability::ResultEnvelope).
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// A required parameter was absent or empty.
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// A parameter was present but unusable.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// An unexpected fault inside the capability implementation.
    #[error("{message}")]
    Execution { message: String },
}

impl CapabilityError {
    /// Shorthand for a missing-parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Shorthand for an execution fault.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }
}

/// Violations of the [`ParameterSchema`](crate::schema::ParameterSchema) invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A name listed in `required` has no matching property.
    #[error("required field '{field}' is not declared in properties")]
    UnknownRequired { field: String },

    /// Enumerated values declared on a non-leaf schema.
    #[error("enum values are only valid on leaf schemas, found on type '{schema_type}'")]
    EnumOnNonLeaf { schema_type: String },
}
