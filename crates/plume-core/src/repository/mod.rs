//! Artifact repositories consulted during plugin resolution.

pub mod schema;

use serde::Serialize;
use thiserror::Error;
use url::Url;

pub use schema::RepositoryConfig;

/// Name of the public plugin portal added when nothing else is configured.
pub const PLUGIN_PORTAL_NAME: &str = "Gradle Central Plugin Repository";

/// Maven-layout URL of the public plugin portal.
pub const PLUGIN_PORTAL_URL: &str = "https://plugins.gradle.org/m2";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Repository '{0}' is already configured")]
    Duplicate(String),

    #[error("Repository name cannot be empty")]
    EmptyName,
}

/// A named repository endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub url: Url,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }

    /// The public plugin portal, or `None` if its URL fails to parse.
    pub fn plugin_portal() -> Option<Self> {
        let url = Url::parse(PLUGIN_PORTAL_URL).ok()?;
        Some(Self::new(PLUGIN_PORTAL_NAME, url))
    }
}

/// Ordered set of repositories, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RepositorySet {
    repositories: Vec<Repository>,
}

impl RepositorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, repository: Repository) -> Result<(), RepositoryError> {
        if repository.name.trim().is_empty() {
            return Err(RepositoryError::EmptyName);
        }
        if self.get(&repository.name).is_some() {
            return Err(RepositoryError::Duplicate(repository.name));
        }
        self.repositories.push(repository);
        Ok(())
    }

    /// Add the public plugin portal unless it is already present.
    ///
    /// Returns true if the set changed.
    pub fn add_plugin_portal(&mut self) -> bool {
        if self.get(PLUGIN_PORTAL_NAME).is_some() {
            return false;
        }
        match Repository::plugin_portal() {
            Some(portal) => {
                self.repositories.push(portal);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Repository> {
        self.repositories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repositories.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl<'a> IntoIterator for &'a RepositorySet {
    type Item = &'a Repository;
    type IntoIter = std::slice::Iter<'a, Repository>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
