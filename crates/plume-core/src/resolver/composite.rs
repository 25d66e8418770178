//! Chain of resolvers consulted in order.

use tracing::debug;

use crate::request::{InvalidPluginRequest, PluginRequest};

use super::outcome::ResolutionOutcome;
use super::PluginResolver;

/// Tries each resolver in turn. The first found result wins; otherwise the
/// not-found reports of every resolver are combined.
#[derive(Default)]
pub struct CompositeResolver {
    resolvers: Vec<Box<dyn PluginResolver>>,
}

impl CompositeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl PluginResolver + 'static) -> Self {
        self.push(resolver);
        self
    }

    pub fn push(&mut self, resolver: impl PluginResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PluginResolver for CompositeResolver {
    fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, InvalidPluginRequest> {
        let mut attempts = Vec::new();

        for (index, resolver) in self.resolvers.iter().enumerate() {
            match resolver.resolve(request)? {
                found @ ResolutionOutcome::Found { .. } => return Ok(found),
                ResolutionOutcome::NotFound { attempts: more } => {
                    debug!(request = %request, resolver = index, "Resolver did not find plugin");
                    attempts.extend(more);
                }
            }
        }

        Ok(ResolutionOutcome::NotFound { attempts })
    }
}
