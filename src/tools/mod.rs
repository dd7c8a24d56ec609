//! Non-planner actions shipped with the server.

pub mod explain_concept;
pub mod ping;

pub use explain_concept::ExplainConceptAction;
pub use ping::PingAction;
