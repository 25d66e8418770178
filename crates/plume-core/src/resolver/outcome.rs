//! Resolution outcomes and result sinks.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::gate::VersionRejection;

use super::context::PluginResolution;

/// Why a repository did not yield the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The version was rejected before any repository was asked.
    Rejected(VersionRejection),
    /// The marker artifact could not be resolved.
    ArtifactNotFound { notation: String },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::Rejected(rejection) => fmt::Display::fmt(rejection, f),
            NotFoundReason::ArtifactNotFound { notation } => {
                write!(f, "Could not resolve plugin artifact '{}'", notation)
            }
        }
    }
}

impl Serialize for NotFoundReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<VersionRejection> for NotFoundReason {
    fn from(rejection: VersionRejection) -> Self {
        NotFoundReason::Rejected(rejection)
    }
}

/// One repository's answer in a failed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundAttempt {
    pub repository: String,
    pub reason: NotFoundReason,
}

/// Result of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ResolutionOutcome {
    Found {
        source_label: String,
        resolution: PluginResolution,
    },
    NotFound {
        attempts: Vec<NotFoundAttempt>,
    },
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found { .. })
    }

    pub fn resolution(&self) -> Option<&PluginResolution> {
        match self {
            ResolutionOutcome::Found { resolution, .. } => Some(resolution),
            ResolutionOutcome::NotFound { .. } => None,
        }
    }

    pub fn attempts(&self) -> &[NotFoundAttempt] {
        match self {
            ResolutionOutcome::Found { .. } => &[],
            ResolutionOutcome::NotFound { attempts } => attempts,
        }
    }

    /// Replay this outcome into a result sink.
    pub fn report_to(&self, sink: &mut dyn PluginResolutionResult) {
        match self {
            ResolutionOutcome::Found {
                source_label,
                resolution,
            } => sink.found(source_label, resolution),
            ResolutionOutcome::NotFound { attempts } => {
                for attempt in attempts {
                    sink.not_found(&attempt.repository, &attempt.reason.to_string());
                }
            }
        }
    }
}

/// Callback-style receiver of resolution results.
pub trait PluginResolutionResult {
    fn found(&mut self, source_label: &str, resolution: &PluginResolution);

    fn not_found(&mut self, repository: &str, reason: &str);
}
