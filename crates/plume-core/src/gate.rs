//! Version gate applied before any repository is consulted.

use thiserror::Error;

use crate::version::VersionSelectorScheme;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Reasons a marker version cannot be resolved deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionRejection {
    #[error("plugin dependency must include a version number for this source")]
    MissingVersion,

    #[error("snapshot plugin versions are not supported")]
    SnapshotVersion,

    #[error("dynamic plugin versions are not supported")]
    DynamicVersion,
}

/// Validate a marker version.
///
/// Checks run in order and stop at the first failure, so an absent version
/// never reaches the selector parser.
pub fn validate(
    version: Option<&str>,
    scheme: &dyn VersionSelectorScheme,
) -> Result<(), VersionRejection> {
    let version = match version {
        Some(v) if !v.is_empty() => v,
        _ => return Err(VersionRejection::MissingVersion),
    };

    if version.ends_with(SNAPSHOT_SUFFIX) {
        return Err(VersionRejection::SnapshotVersion);
    }

    if scheme.parse_selector(version).is_dynamic() {
        return Err(VersionRejection::DynamicVersion);
    }

    Ok(())
}
