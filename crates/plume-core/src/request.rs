//! Plugin requests as submitted by a build script.
//!
//! A request always names a plugin id. It either carries a full module
//! selector (group, name, version) or a bare version to pair with the id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised for requests that violate the caller contract.
///
/// These are never turned into not-found reports; they propagate to the
/// caller of `resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPluginRequest {
    /// The plugin id is not a valid dotted identifier.
    #[error("plugin id '{id}' is invalid: {reason}")]
    InvalidId { id: String, reason: String },

    /// A module selector was given but it cannot name an artifact.
    #[error("plugin request '{id}' has an invalid module selector '{selector}': {reason}")]
    InvalidModule {
        id: String,
        selector: String,
        reason: String,
    },

    /// Module notation could not be parsed.
    #[error("invalid module notation '{0}', expected 'group:name[:version]'")]
    InvalidNotation(String),
}

/// Validated plugin identifier, e.g. `com.example.hello`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId(String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidPluginRequest> {
        let id = id.into();
        if let Some(reason) = Self::validate(&id) {
            return Err(InvalidPluginRequest::InvalidId { id, reason });
        }
        Ok(Self(id))
    }

    fn validate(id: &str) -> Option<String> {
        if id.is_empty() {
            return Some("plugin id cannot be empty".to_string());
        }
        if id.starts_with('.') || id.ends_with('.') {
            return Some("plugin id cannot start or end with '.'".to_string());
        }
        if id.contains("..") {
            return Some("plugin id cannot contain '..'".to_string());
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        {
            return Some(format!("plugin id contains invalid character '{}'", c));
        }
        None
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginId {
    type Err = InvalidPluginRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PluginId {
    type Error = InvalidPluginRequest;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginId> for String {
    fn from(id: PluginId) -> Self {
        id.0
    }
}

/// Explicit module coordinates for a plugin implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSelector {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl ModuleSelector {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.name, version),
            None => write!(f, "{}:{}", self.group, self.name),
        }
    }
}

impl FromStr for ModuleSelector {
    type Err = InvalidPluginRequest;

    /// Parse `group:name` or `group:name:version`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let selector = match parts.as_slice() {
            [group, name] => ModuleSelector::new(*group, *name),
            [group, name, version] => ModuleSelector::new(*group, *name).with_version(*version),
            _ => return Err(InvalidPluginRequest::InvalidNotation(s.to_string())),
        };
        if selector.group.is_empty() || selector.name.is_empty() {
            return Err(InvalidPluginRequest::InvalidNotation(s.to_string()));
        }
        Ok(selector)
    }
}

/// A request for a named, versioned plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    pub id: PluginId,
    #[serde(default)]
    pub module: Option<ModuleSelector>,
    #[serde(default)]
    pub version: Option<String>,
}

impl PluginRequest {
    pub fn new(id: PluginId) -> Self {
        Self {
            id,
            module: None,
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_module(mut self, module: ModuleSelector) -> Self {
        self.module = Some(module);
        self
    }

    /// Check the caller contract.
    ///
    /// A missing version is not a contract violation; it surfaces later as
    /// a not-found report. Only a module selector that cannot name an
    /// artifact is rejected here.
    pub fn validate(&self) -> Result<(), InvalidPluginRequest> {
        let Some(module) = &self.module else {
            return Ok(());
        };
        let reason = if module.group.trim().is_empty() {
            "group cannot be empty"
        } else if module.name.trim().is_empty() {
            "name cannot be empty"
        } else if module.group.contains(':') || module.name.contains(':') {
            "group and name cannot contain ':'"
        } else {
            return Ok(());
        };
        Err(InvalidPluginRequest::InvalidModule {
            id: self.id.to_string(),
            selector: module.to_string(),
            reason: reason.to_string(),
        })
    }
}

impl fmt::Display for PluginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[id: '{}'", self.id)?;
        if let Some(version) = &self.version {
            write!(f, ", version: '{}'", version)?;
        }
        if let Some(module) = &self.module {
            write!(f, ", artifact: '{}'", module)?;
        }
        f.write_str("]")
    }
}
