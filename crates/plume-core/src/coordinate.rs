//! Marker coordinates derived from plugin requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::PluginRequest;

/// Suffix appended to a plugin id to form its marker artifact name.
pub const PLUGIN_MARKER_SUFFIX: &str = ".gradle.plugin";

/// The artifact coordinate probed to test availability of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerCoordinate {
    pub group: String,
    pub name: String,
    pub version: Option<String>,
}

impl MarkerCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version,
        }
    }

    /// Derive the marker coordinate for a request.
    ///
    /// An explicit module selector wins. Otherwise the plugin id doubles as
    /// the group and, with the marker suffix, as the artifact name.
    pub fn derive(request: &PluginRequest) -> Self {
        match &request.module {
            Some(selector) => Self::new(
                selector.group.clone(),
                selector.name.clone(),
                selector.version.clone(),
            ),
            None => {
                let id = request.id.id();
                Self::new(
                    id,
                    format!("{}{}", id, PLUGIN_MARKER_SUFFIX),
                    request.version.clone(),
                )
            }
        }
    }

    /// `group:name:version`; an absent version renders as `null`.
    pub fn notation(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group,
            self.name,
            self.version.as_deref().unwrap_or("null")
        )
    }
}

impl fmt::Display for MarkerCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
