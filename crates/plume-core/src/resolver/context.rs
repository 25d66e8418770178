//! Build context that resolved plugins are applied to.

use serde::Serialize;

use crate::coordinate::MarkerCoordinate;
use crate::request::PluginId;

/// Receives resolved plugins and wires them into a build.
pub trait PluginResolveContext {
    /// Register `coordinate` as a classpath dependency providing `plugin_id`.
    fn add_legacy(&mut self, plugin_id: &PluginId, coordinate: &MarkerCoordinate);
}

/// A successful resolution, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginResolution {
    plugin_id: PluginId,
    coordinate: MarkerCoordinate,
}

impl PluginResolution {
    pub fn new(plugin_id: PluginId, coordinate: MarkerCoordinate) -> Self {
        Self {
            plugin_id,
            coordinate,
        }
    }

    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    pub fn coordinate(&self) -> &MarkerCoordinate {
        &self.coordinate
    }

    pub fn apply(&self, context: &mut dyn PluginResolveContext) {
        context.add_legacy(&self.plugin_id, &self.coordinate);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClasspathEntry {
    pub plugin_id: PluginId,
    pub coordinate: MarkerCoordinate,
}

/// Records applied plugins as an ordered classpath.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClasspathContext {
    entries: Vec<ClasspathEntry>,
}

impl ClasspathContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Notations of every registered coordinate, in registration order.
    pub fn classpath(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.coordinate.notation()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PluginResolveContext for ClasspathContext {
    fn add_legacy(&mut self, plugin_id: &PluginId, coordinate: &MarkerCoordinate) {
        self.entries.push(ClasspathEntry {
            plugin_id: plugin_id.clone(),
            coordinate: coordinate.clone(),
        });
    }
}
