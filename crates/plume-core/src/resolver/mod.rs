//! Plugin resolution.
//!
//! A resolver turns a [`PluginRequest`] into a [`ResolutionOutcome`]:
//! either a resolution that can be applied to a build context, or one
//! not-found report per repository that was consulted.

mod artifact;
mod composite;
mod context;
mod outcome;

use crate::request::{InvalidPluginRequest, PluginRequest};

pub use artifact::{ArtifactRepositoriesResolver, SOURCE_LABEL};
pub use composite::CompositeResolver;
pub use context::{ClasspathContext, ClasspathEntry, PluginResolution, PluginResolveContext};
pub use outcome::{NotFoundAttempt, NotFoundReason, PluginResolutionResult, ResolutionOutcome};

/// A strategy for locating plugin implementations.
///
/// Resolvers hold no per-call state, so independent requests may be
/// resolved concurrently through a shared reference.
pub trait PluginResolver: Send + Sync {
    /// Resolve one request.
    ///
    /// Resolution failures are reported through the outcome. An error is
    /// returned only when the request itself is malformed.
    fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, InvalidPluginRequest>;
}
