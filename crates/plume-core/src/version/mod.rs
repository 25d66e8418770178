//! Version selector schemes.
//!
//! A scheme turns a version string into a selector. The resolver only
//! needs to know whether that selector is dynamic, i.e. whether it could
//! match more than one version over time.

mod default;
mod semantic;

use serde::{Deserialize, Serialize};

pub use default::{DefaultSelectorKind, DefaultVersionSelector, DefaultVersionSelectorScheme};
pub use semantic::{SemverSelector, SemverSelectorScheme};

/// A parsed version selector.
pub trait VersionSelector: std::fmt::Debug {
    /// True if the selector denotes a range or a moving target.
    fn is_dynamic(&self) -> bool;

    /// The selector text as it was parsed.
    fn as_str(&self) -> &str;
}

/// Grammar used to interpret version strings.
pub trait VersionSelectorScheme: Send + Sync {
    /// Parse a selector. Never fails; input the grammar does not recognise
    /// is treated as an exact version.
    fn parse_selector(&self, version: &str) -> Box<dyn VersionSelector>;
}

impl<T: VersionSelectorScheme + ?Sized> VersionSelectorScheme for Box<T> {
    fn parse_selector(&self, version: &str) -> Box<dyn VersionSelector> {
        (**self).parse_selector(version)
    }
}

/// Configurable choice of scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeKind {
    /// Build-tool grammar: `1.+`, `latest.release`, `[1.0,2.0)`
    #[default]
    Default,
    /// Cargo-style semantic version requirements
    Semver,
}

impl SchemeKind {
    pub fn build(self) -> Box<dyn VersionSelectorScheme> {
        match self {
            SchemeKind::Default => Box::new(DefaultVersionSelectorScheme),
            SchemeKind::Semver => Box::new(SemverSelectorScheme),
        }
    }
}

impl std::str::FromStr for SchemeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SchemeKind::Default),
            "semver" => Ok(SchemeKind::Semver),
            other => anyhow::bail!(
                "Unknown version scheme '{}': expected 'default' or 'semver'",
                other
            ),
        }
    }
}
