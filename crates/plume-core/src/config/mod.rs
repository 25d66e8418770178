//! Configuration for plume
//!
//! `plume.toml` declares the repositories to consult and the version
//! grammar used by the resolver:
//!
//! ```toml
//! [resolver]
//! scheme = "default"
//!
//! [[repositories]]
//! name = "internal"
//! url = "https://repo.example.com/maven"
//! artifacts = ["com.example.foo:com.example.foo.gradle.plugin:1.0"]
//! ```

pub mod parser;
pub mod paths;

use serde::{Deserialize, Serialize};

use crate::repository::RepositoryConfig;
use crate::resolver::ArtifactRepositoriesResolver;
use crate::service::CatalogResolutionService;
use crate::version::{SchemeKind, VersionSelectorScheme};

pub use parser::{parse_plume_toml, parse_plume_toml_str, to_toml};
pub use paths::default_config_path;

/// Resolver built from configuration.
pub type ConfiguredResolver =
    ArtifactRepositoriesResolver<CatalogResolutionService, Box<dyn VersionSelectorScheme>>;

/// Root configuration structure for plume.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlumeConfig {
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Repositories in the order they are consulted
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
}

/// `[resolver]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Version selector grammar
    #[serde(default)]
    pub scheme: SchemeKind,

    /// Fall back to the public plugin portal when no repository is listed
    #[serde(default = "default_true")]
    pub plugin_portal: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            plugin_portal: true,
        }
    }
}

impl PlumeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every repository entry and reject duplicate names
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for repository in &self.repositories {
            repository.validate()?;
            if !seen.insert(repository.name.as_str()) {
                anyhow::bail!("Repository '{}' is declared more than once", repository.name);
            }
        }
        Ok(())
    }

    /// Build the catalog-backed resolver this configuration describes
    pub fn build_resolver(&self) -> anyhow::Result<ConfiguredResolver> {
        let service = CatalogResolutionService::from_config(&self.repositories)?;
        let scheme = self.resolver.scheme.build();
        let resolver = if self.resolver.plugin_portal {
            ArtifactRepositoriesResolver::create_with_defaults(service, scheme)
        } else {
            ArtifactRepositoriesResolver::new(service, scheme)
        };
        Ok(resolver)
    }
}
