//! Resolution service collaborator.
//!
//! The service owns the repository set and performs the actual artifact
//! lookups. The resolver only ever asks it single-coordinate questions.

mod catalog;

use serde::Serialize;
use thiserror::Error;

use crate::coordinate::MarkerCoordinate;
use crate::repository::RepositorySet;

pub use catalog::CatalogResolutionService;

/// Errors a resolution service may report for a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No consulted repository has the artifact.
    #[error("Could not find {notation}")]
    NotFound { notation: String },

    /// A repository could not be reached or answered with an error.
    #[error("Repository '{repository}' is unavailable: {message}")]
    Unavailable { repository: String, message: String },
}

impl ResolveError {
    /// True for infrastructure failures as opposed to genuine absence.
    pub fn is_transient(&self) -> bool {
        matches!(self, ResolveError::Unavailable { .. })
    }
}

/// A detached query for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyQuery {
    pub coordinate: MarkerCoordinate,
    pub transitive: bool,
}

impl DependencyQuery {
    /// Query for the coordinate alone, without its dependencies.
    pub fn detached(coordinate: MarkerCoordinate) -> Self {
        Self {
            coordinate,
            transitive: false,
        }
    }
}

/// Where a query was satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub coordinate: MarkerCoordinate,
    pub repository: String,
}

/// Backing dependency resolution.
pub trait ResolutionService {
    /// Repositories in the order they are consulted.
    fn repositories(&self) -> &RepositorySet;

    /// Mutable access for bootstrap configuration.
    fn repositories_mut(&mut self) -> &mut RepositorySet;

    /// Resolve a query. Blocks until every needed repository has answered.
    fn resolve(&self, query: &DependencyQuery) -> Result<ResolvedArtifact, ResolveError>;
}
