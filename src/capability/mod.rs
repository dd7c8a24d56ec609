//! Core capability abstractions.
//!
//! A capability is the unit of registration: a callable action, a
//! URI-addressed data provider, or a response-generating template. The three
//! kinds share a common descriptor (name, description, kind) and are unified
//! behind the closed [`Capability`] variant, dispatched by pattern match.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod action;
pub mod provider;
pub mod template;

pub use action::Action;
pub use provider::DataProvider;
pub use template::Template;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// The kind of a registered capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Action,
    DataProvider,
    Template,
}

/// A registered capability of one of the three kinds.
///
/// Capabilities are immutable once constructed. The registry is their
/// long-lived owner; `Arc` lets a capability also be held by a collaborator
/// (the general planner keeps references to its delegate planners) without
/// duplicate instantiation.
#[derive(Clone)]
pub enum Capability {
    Action(Arc<dyn Action>),
    DataProvider(Arc<dyn DataProvider>),
    Template(Arc<dyn Template>),
}

impl Capability {
    /// Identity of the capability within its kind. Data providers are
    /// identified by their URI pattern.
    pub fn name(&self) -> &str {
        match self {
            Capability::Action(a) => a.name(),
            Capability::DataProvider(p) => p.uri_pattern(),
            Capability::Template(t) => t.name(),
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        match self {
            Capability::Action(a) => a.description(),
            Capability::DataProvider(p) => p.description(),
            Capability::Template(t) => t.description(),
        }
    }

    /// Kind tag of this capability.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Action(_) => CapabilityKind::Action,
            Capability::DataProvider(_) => CapabilityKind::DataProvider,
            Capability::Template(_) => CapabilityKind::Template,
        }
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ResultEnvelope
// ---------------------------------------------------------------------------

/// The uniform result wrapper returned by every invocation.
///
/// `message` is always present and human-readable. `data` only accompanies
/// certain success paths; when present alongside a failure it is advisory
/// (e.g. the list of valid alternatives).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResultEnvelope {
    /// A success with no structured payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// A success carrying a structured payload.
    pub fn ok_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A success whose payload is encoded from an arbitrary serializable
    /// value. Encoding failure degrades to a text-only success envelope with
    /// a warning appended to the message; it is not conflated with business
    /// failure.
    pub fn ok_encoding<T: Serialize>(message: impl Into<String>, data: &T) -> Self {
        let message = message.into();
        match serde_json::to_value(data) {
            Ok(value) => Self::ok_with_data(message, value),
            Err(e) => {
                log::warn!("Failed to encode result data: {}", e);
                Self::ok(format!(
                    "{}\n\nWarning: failed to encode result data: {}",
                    message, e
                ))
            }
        }
    }

    /// A failure with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// A failure carrying advisory data.
    pub fn failure_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

// ---------------------------------------------------------------------------
// Resource read results
// ---------------------------------------------------------------------------

/// A single readable record returned by a data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub content: String,
}

impl ResourceContent {
    pub fn new(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }
}

/// Outcome of a resource read. An empty content list is the explicit
/// no-match marker, distinct from an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResult {
    pub contents: Vec<ResourceContent>,
}

impl ReadResult {
    /// The explicit empty-result marker.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result holding a single record.
    pub fn single(content: ResourceContent) -> Self {
        Self {
            contents: vec![content],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Template responses
// ---------------------------------------------------------------------------

/// The rendered output of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl TemplateResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn test_ok_encoding_carries_data() {
        let envelope = ResultEnvelope::ok_encoding("done", &serde_json::json!({"a": 1}));
        assert!(envelope.success);
        assert_eq!(envelope.message, "done");
        assert_eq!(envelope.data, Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn test_ok_encoding_degrades_to_text_only() {
        let envelope = ResultEnvelope::ok_encoding("done", &Unencodable);
        assert!(envelope.success, "encoding failure must not flip success");
        assert!(envelope.data.is_none());
        assert!(envelope.message.starts_with("done"));
        assert!(envelope.message.contains("Warning: failed to encode result data"));
    }

    #[test]
    fn test_failure_envelope_serialization_omits_absent_data() {
        let envelope = ResultEnvelope::failure("nope");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "message": "nope"}));
    }
}
