//! The URI-addressed capability kind.

use crate::capability::ResourceContent;

/// A capability addressed by URI pattern that returns readable content.
///
/// Providers are matched in registration order; the first provider whose
/// pattern matches a requested URI is chosen, so patterns need not be
/// mutually exclusive.
pub trait DataProvider: Send + Sync {
    /// The URI pattern this provider handles, in the form it is advertised
    /// to callers (a regex with one capture group per variable segment).
    fn uri_pattern(&self) -> &str;

    /// Human-readable description of the provider.
    fn description(&self) -> &str;

    /// Whether this provider structurally matches the given URI.
    fn matches(&self, uri: &str) -> bool;

    /// Read the resource at `uri`. `None` means the URI does not resolve to
    /// content for this provider; the dispatcher maps it to an empty result,
    /// never an error.
    fn read(&self, uri: &str) -> Option<ResourceContent>;
}
