//! # MCP Server Factory
//!
//! A Model Context Protocol server exposing tools, resources, and prompts
//! through a uniform capability registry.
//!
//! Capabilities come in three kinds: actions (callable tools), data
//! providers (URI-addressed resources), and templates (parameterized
//! prompts). A [`registry::Registry`] holds the catalog, a
//! [`dispatch::Dispatcher`] resolves invocations against it with full fault
//! containment, and [`server::McpServer`] speaks JSON-RPC over stdio on top.

pub mod capability;
pub mod dispatch;
pub mod error;
pub mod plan;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod server;
pub mod templates;
pub mod tools;

pub use capability::{Action, Capability, CapabilityKind, DataProvider, ResultEnvelope, Template};
pub use dispatch::Dispatcher;
pub use error::CapabilityError;
pub use registry::Registry;
pub use schema::ParameterSchema;
pub use server::McpServer;

/// Server version, reported during initialization.
pub const VERSION: &str = "1.0.0";
