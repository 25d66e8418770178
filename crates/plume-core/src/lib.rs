//! Plume Core Library
//!
//! Resolves plugin requests against a configured set of artifact
//! repositories by probing for a plugin marker artifact.

pub mod config;
pub mod coordinate;
pub mod gate;
pub mod repository;
pub mod request;
pub mod resolver;
pub mod service;
pub mod version;

/// Re-exports of commonly used types
pub mod prelude {
    // Requests
    pub use crate::coordinate::{MarkerCoordinate, PLUGIN_MARKER_SUFFIX};
    pub use crate::request::{InvalidPluginRequest, ModuleSelector, PluginId, PluginRequest};

    // Version handling
    pub use crate::gate::VersionRejection;
    pub use crate::version::{
        DefaultVersionSelectorScheme, SchemeKind, SemverSelectorScheme, VersionSelector,
        VersionSelectorScheme,
    };

    // Repositories
    pub use crate::repository::{Repository, RepositoryConfig, RepositorySet};
    pub use crate::service::{
        CatalogResolutionService, DependencyQuery, ResolutionService, ResolveError,
    };

    // Resolution
    pub use crate::resolver::{
        ArtifactRepositoriesResolver, ClasspathContext, CompositeResolver, NotFoundAttempt,
        NotFoundReason, PluginResolution, PluginResolutionResult, PluginResolveContext,
        PluginResolver, ResolutionOutcome,
    };

    // Configuration
    pub use crate::config::{PlumeConfig, ResolverSettings};
}
