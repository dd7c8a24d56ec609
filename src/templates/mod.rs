//! Prompt templates shipped with the server.

pub mod bootstrap;
pub mod tool_guide;

pub use bootstrap::BootstrapServerTemplate;
pub use tool_guide::ToolImplementationGuideTemplate;
