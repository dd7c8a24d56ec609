//! Invocation dispatcher.
//!
//! Single entry point translating an invocation (name/URI plus parameters)
//! into a uniform result: resolve the target through the registry, invoke it,
//! and wrap the outcome. Every fault raised by capability code is contained
//! here; nothing above the dispatcher ever observes an error from a
//! capability, only a well-formed [`ResultEnvelope`] or an empty read result.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::capability::{ReadResult, ResultEnvelope};
use crate::registry::Registry;

/// Translates invocation requests into result envelopes via registry lookup
/// and fault containment. Cheap to clone; shares the registry.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Create a dispatcher over a populated registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher resolves against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Invoke an action by exact name.
    ///
    /// An unknown name is a soft failure, not an error. An `Err` from the
    /// action is converted into a failure envelope carrying its message.
    pub fn invoke_action(
        &self,
        name: &str,
        parameters: &HashMap<String, Value>,
    ) -> ResultEnvelope {
        let Some(action) = self.registry.lookup_action(name) else {
            log::warn!("Tool not found: {}", name);
            return ResultEnvelope::failure(format!("Tool not found: {}", name));
        };

        log::info!("Invoking tool: {}", name);
        match action.execute(parameters) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("Tool '{}' failed: {}", name, e);
                ResultEnvelope::failure(e.to_string())
            }
        }
    }

    /// Read a resource by URI, via the first registered provider whose
    /// pattern matches. No matching provider, or a provider that resolves
    /// nothing for the URI, yields the explicit empty result.
    pub fn read_resource(&self, uri: &str) -> ReadResult {
        let Some(provider) = self.registry.match_provider(uri) else {
            log::warn!("No resource provider matches URI: {}", uri);
            return ReadResult::empty();
        };

        log::info!("Reading resource: {}", uri);
        match provider.read(uri) {
            Some(content) => ReadResult::single(content),
            None => ReadResult::empty(),
        }
    }

    /// Render a template by exact name.
    ///
    /// On success the envelope's message is the template's description and
    /// `data` carries the rendered `content` plus optional `metadata`.
    pub fn render_template(
        &self,
        name: &str,
        parameters: &HashMap<String, Value>,
    ) -> ResultEnvelope {
        let Some(template) = self.registry.lookup_template(name) else {
            log::warn!("Prompt not found: {}", name);
            return ResultEnvelope::failure(format!("Prompt not found: {}", name));
        };

        log::info!("Rendering prompt: {}", name);
        match template.render(parameters) {
            Ok(response) => ResultEnvelope::ok_with_data(
                template.description().to_string(),
                json!({
                    "content": response.content,
                    "metadata": response.metadata,
                }),
            ),
            Err(e) => {
                log::warn!("Prompt '{}' failed: {}", name, e);
                ResultEnvelope::failure(e.to_string())
            }
        }
    }
}
