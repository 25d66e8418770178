//! Repository configuration schema
//!
//! Defines `[[repositories]]` entries in plume.toml

use serde::{Deserialize, Serialize};
use url::Url;

use crate::coordinate::MarkerCoordinate;

use super::Repository;

/// Repository configuration from plume.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Name reported in resolution diagnostics
    pub name: String,

    /// Repository base URL
    pub url: Url,

    /// Artifacts published in this repository: "group:name:version"
    #[serde(default)]
    pub artifacts: Vec<String>,
}

impl RepositoryConfig {
    /// Validate a single repository entry
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Repository name cannot be empty");
        }
        if !matches!(self.url.scheme(), "http" | "https" | "file") {
            anyhow::bail!(
                "Repository '{}' has unsupported URL scheme '{}'",
                self.name,
                self.url.scheme()
            );
        }
        for artifact in &self.artifacts {
            self.parse_artifact(artifact)?;
        }
        Ok(())
    }

    /// Parse a published artifact notation
    pub fn parse_artifact(&self, artifact: &str) -> anyhow::Result<MarkerCoordinate> {
        match artifact.split(':').collect::<Vec<_>>().as_slice() {
            [group, name, version]
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(MarkerCoordinate::new(
                    *group,
                    *name,
                    Some((*version).to_string()),
                ))
            }
            _ => anyhow::bail!(
                "Repository '{}' lists invalid artifact '{}', expected 'group:name:version'",
                self.name,
                artifact
            ),
        }
    }

    pub fn to_repository(&self) -> Repository {
        Repository::new(self.name.clone(), self.url.clone())
    }
}
