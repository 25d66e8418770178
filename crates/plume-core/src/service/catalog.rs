//! Static catalog implementation of the resolution service.

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use tracing::debug;

use crate::coordinate::MarkerCoordinate;
use crate::repository::{Repository, RepositoryConfig, RepositorySet};

use super::{DependencyQuery, ResolutionService, ResolveError, ResolvedArtifact};

/// Answers queries from a fixed list of published artifacts per repository.
///
/// Repositories are consulted in order; the first one that publishes the
/// coordinate satisfies the query.
#[derive(Debug, Clone, Default)]
pub struct CatalogResolutionService {
    repositories: RepositorySet,
    published: HashMap<String, HashSet<MarkerCoordinate>>,
    unavailable: HashMap<String, String>,
}

impl CatalogResolutionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `[[repositories]]` configuration entries.
    pub fn from_config(configs: &[RepositoryConfig]) -> anyhow::Result<Self> {
        let mut service = Self::new();
        for config in configs {
            config.validate()?;
            service
                .add_repository(config.to_repository())
                .with_context(|| format!("Failed to add repository '{}'", config.name))?;
            for artifact in &config.artifacts {
                let coordinate = config.parse_artifact(artifact)?;
                service.publish(&config.name, coordinate);
            }
        }
        Ok(service)
    }

    pub fn add_repository(&mut self, repository: Repository) -> anyhow::Result<()> {
        self.repositories.add(repository)?;
        Ok(())
    }

    /// Record that `repository` publishes `coordinate`.
    pub fn publish(&mut self, repository: &str, coordinate: MarkerCoordinate) {
        self.published
            .entry(repository.to_string())
            .or_default()
            .insert(coordinate);
    }

    /// Make every query touching `repository` fail with `message`.
    pub fn mark_unavailable(&mut self, repository: &str, message: impl Into<String>) {
        self.unavailable
            .insert(repository.to_string(), message.into());
    }

    fn publishes(&self, repository: &str, coordinate: &MarkerCoordinate) -> bool {
        self.published
            .get(repository)
            .is_some_and(|artifacts| artifacts.contains(coordinate))
    }
}

impl ResolutionService for CatalogResolutionService {
    fn repositories(&self) -> &RepositorySet {
        &self.repositories
    }

    fn repositories_mut(&mut self) -> &mut RepositorySet {
        &mut self.repositories
    }

    fn resolve(&self, query: &DependencyQuery) -> Result<ResolvedArtifact, ResolveError> {
        let coordinate = &query.coordinate;
        let mut failure = None;

        for repository in &self.repositories {
            if let Some(message) = self.unavailable.get(&repository.name) {
                debug!(repository = %repository.name, "Repository unavailable: {}", message);
                failure.get_or_insert_with(|| ResolveError::Unavailable {
                    repository: repository.name.clone(),
                    message: message.clone(),
                });
                continue;
            }
            if coordinate.version.is_some() && self.publishes(&repository.name, coordinate) {
                return Ok(ResolvedArtifact {
                    coordinate: coordinate.clone(),
                    repository: repository.name.clone(),
                });
            }
        }

        Err(failure.unwrap_or_else(|| ResolveError::NotFound {
            notation: coordinate.notation(),
        }))
    }
}
