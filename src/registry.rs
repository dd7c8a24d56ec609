//! Capability registry.
//!
//! Owns the mapping from capability identity to implementation, per kind:
//! actions and templates are keyed by name, data providers by URI pattern.
//! The registry is populated once at startup and treated as read-only
//! afterwards, so lookups need no locking; wrap it in an `Arc` to share it
//! with the dispatcher and protocol adapter.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capability::{Action, Capability, CapabilityKind, DataProvider, Template};

/// In-memory, read-mostly store of registered capabilities.
///
/// Duplicate registration within a kind follows last-write-wins:
/// [`register`](Self::register) replaces the existing entry, logs a warning,
/// and returns the displaced capability so callers can observe the conflict.
#[derive(Default)]
pub struct Registry {
    /// Actions keyed by name.
    actions: HashMap<String, Arc<dyn Action>>,

    /// Templates keyed by name.
    templates: HashMap<String, Arc<dyn Template>>,

    /// Data providers in registration order. Matching walks this list front
    /// to back, which is the only place registry iteration order is
    /// observable behavior.
    providers: Vec<Arc<dyn DataProvider>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability. Returns the capability displaced by a
    /// duplicate name within the same kind, if any.
    pub fn register(&mut self, capability: Capability) -> Option<Capability> {
        let displaced = match capability {
            Capability::Action(action) => {
                log::info!("Registering tool: {}", action.name());
                self.actions
                    .insert(action.name().to_string(), action)
                    .map(Capability::Action)
            }
            Capability::Template(template) => {
                log::info!("Registering prompt: {}", template.name());
                self.templates
                    .insert(template.name().to_string(), template)
                    .map(Capability::Template)
            }
            Capability::DataProvider(provider) => {
                log::info!("Registering resource provider: {}", provider.uri_pattern());
                match self
                    .providers
                    .iter()
                    .position(|p| p.uri_pattern() == provider.uri_pattern())
                {
                    Some(index) => {
                        let old = std::mem::replace(&mut self.providers[index], provider);
                        Some(Capability::DataProvider(old))
                    }
                    None => {
                        self.providers.push(provider);
                        None
                    }
                }
            }
        };

        if let Some(old) = &displaced {
            log::warn!(
                "Duplicate registration for {:?} '{}', replacing previous capability",
                old.kind(),
                old.name()
            );
        }
        displaced
    }

    /// Look up an action by exact name. Absence is a normal outcome.
    pub fn lookup_action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Look up a template by exact name.
    pub fn lookup_template(&self, name: &str) -> Option<Arc<dyn Template>> {
        self.templates.get(name).cloned()
    }

    /// Find the first registered provider whose pattern matches `uri`.
    pub fn match_provider(&self, uri: &str) -> Option<Arc<dyn DataProvider>> {
        self.providers.iter().find(|p| p.matches(uri)).cloned()
    }

    /// All registered actions, in no meaningful order.
    pub fn actions(&self) -> Vec<Arc<dyn Action>> {
        self.actions.values().cloned().collect()
    }

    /// All registered templates, in no meaningful order.
    pub fn templates(&self) -> Vec<Arc<dyn Template>> {
        self.templates.values().cloned().collect()
    }

    /// All registered providers, in registration order.
    pub fn providers(&self) -> Vec<Arc<dyn DataProvider>> {
        self.providers.clone()
    }

    /// Enumerate all capabilities of a kind. Used for discovery and
    /// documentation, never for dispatch.
    pub fn list(&self, kind: CapabilityKind) -> Vec<Capability> {
        match kind {
            CapabilityKind::Action => {
                self.actions.values().cloned().map(Capability::Action).collect()
            }
            CapabilityKind::Template => self
                .templates
                .values()
                .cloned()
                .map(Capability::Template)
                .collect(),
            CapabilityKind::DataProvider => self
                .providers
                .iter()
                .cloned()
                .map(Capability::DataProvider)
                .collect(),
        }
    }

    /// Total number of registered capabilities across all kinds.
    pub fn len(&self) -> usize {
        self.actions.len() + self.templates.len() + self.providers.len()
    }

    /// Whether the registry holds no capabilities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|p| p.uri_pattern())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
