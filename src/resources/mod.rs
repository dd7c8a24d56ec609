//! Data providers shipped with the server.

pub mod documentation;

pub use documentation::DocumentationProvider;
