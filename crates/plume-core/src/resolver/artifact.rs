//! Resolver backed by artifact repositories.
//!
//! A plugin is considered available when its marker artifact resolves in
//! one of the configured repositories. The marker is either the module the
//! request names explicitly or `<id>:<id>.gradle.plugin:<version>`.

use tracing::{debug, info, warn};

use crate::coordinate::MarkerCoordinate;
use crate::gate;
use crate::request::{InvalidPluginRequest, PluginRequest};
use crate::service::{DependencyQuery, ResolutionService};
use crate::version::VersionSelectorScheme;

use super::context::PluginResolution;
use super::outcome::{NotFoundAttempt, NotFoundReason, ResolutionOutcome};
use super::PluginResolver;

/// Label identifying this resolver in found reports.
pub const SOURCE_LABEL: &str = "Plugin Artifact Repositories";

pub struct ArtifactRepositoriesResolver<S, V> {
    service: S,
    scheme: V,
}

impl<S, V> ArtifactRepositoriesResolver<S, V>
where
    S: ResolutionService,
    V: VersionSelectorScheme,
{
    pub fn new(service: S, scheme: V) -> Self {
        Self { service, scheme }
    }

    /// Create a resolver, adding the public plugin portal first if the
    /// service has no repositories configured.
    pub fn create_with_defaults(mut service: S, scheme: V) -> Self {
        if service.repositories().is_empty() && service.repositories_mut().add_plugin_portal() {
            info!("No plugin repositories configured, using the plugin portal");
        }
        Self::new(service, scheme)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }

    /// Check whether the marker artifact resolves in any repository.
    ///
    /// Every call issues a fresh query. Service failures of any kind count
    /// as absence.
    pub fn exists(&self, coordinate: &MarkerCoordinate) -> bool {
        let query = DependencyQuery::detached(coordinate.clone());
        match self.service.resolve(&query) {
            Ok(artifact) => {
                debug!(
                    coordinate = %coordinate,
                    repository = %artifact.repository,
                    "Marker artifact resolved"
                );
                true
            }
            Err(err) if err.is_transient() => {
                warn!(coordinate = %coordinate, "Treating plugin artifact as missing: {}", err);
                false
            }
            Err(err) => {
                debug!(coordinate = %coordinate, "{}", err);
                false
            }
        }
    }

    /// One report per configured repository, all with the same reason.
    fn not_found(&self, reason: NotFoundReason) -> ResolutionOutcome {
        let attempts = self
            .service
            .repositories()
            .names()
            .map(|name| NotFoundAttempt {
                repository: name.to_string(),
                reason: reason.clone(),
            })
            .collect();
        ResolutionOutcome::NotFound { attempts }
    }
}

impl<S, V> PluginResolver for ArtifactRepositoriesResolver<S, V>
where
    S: ResolutionService + Send + Sync,
    V: VersionSelectorScheme,
{
    fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, InvalidPluginRequest> {
        request.validate()?;

        let coordinate = MarkerCoordinate::derive(request);
        debug!(request = %request, coordinate = %coordinate, "Resolving plugin marker");

        if let Err(rejection) = gate::validate(coordinate.version.as_deref(), &self.scheme) {
            debug!(request = %request, "Version rejected: {}", rejection);
            return Ok(self.not_found(rejection.into()));
        }

        if self.exists(&coordinate) {
            info!(plugin = %request.id, coordinate = %coordinate, "Resolved plugin");
            return Ok(ResolutionOutcome::Found {
                source_label: SOURCE_LABEL.to_string(),
                resolution: PluginResolution::new(request.id.clone(), coordinate),
            });
        }

        Ok(self.not_found(NotFoundReason::ArtifactNotFound {
            notation: coordinate.notation(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use url::Url;

    use super::*;
    use crate::repository::{PLUGIN_PORTAL_NAME, Repository, RepositorySet};
    use crate::request::{ModuleSelector, PluginId};
    use crate::service::{CatalogResolutionService, ResolveError, ResolvedArtifact};
    use crate::version::DefaultVersionSelectorScheme;

    /// Counts queries and answers from a fixed result.
    struct ScriptedService {
        repositories: RepositorySet,
        answer: Result<(), ResolveError>,
        queries: AtomicUsize,
        last_query: Mutex<Option<bool>>,
    }

    impl ScriptedService {
        fn new(names: &[&str], answer: Result<(), ResolveError>) -> Self {
            let mut repositories = RepositorySet::new();
            for name in names {
                let url = Url::parse("https://repo.example.com").unwrap();
                repositories.add(Repository::new(*name, url)).unwrap();
            }
            Self {
                repositories,
                answer,
                queries: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            }
        }
    }

    impl ResolutionService for ScriptedService {
        fn repositories(&self) -> &RepositorySet {
            &self.repositories
        }

        fn repositories_mut(&mut self) -> &mut RepositorySet {
            &mut self.repositories
        }

        fn resolve(&self, query: &DependencyQuery) -> Result<ResolvedArtifact, ResolveError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.transitive);
            self.answer.clone().map(|()| ResolvedArtifact {
                coordinate: query.coordinate.clone(),
                repository: "scripted".to_string(),
            })
        }
    }

    fn request(id: &str) -> PluginRequest {
        PluginRequest::new(PluginId::new(id).unwrap())
    }

    fn resolver(
        answer: Result<(), ResolveError>,
    ) -> ArtifactRepositoriesResolver<ScriptedService, DefaultVersionSelectorScheme> {
        ArtifactRepositoriesResolver::new(
            ScriptedService::new(&["first", "second"], answer),
            DefaultVersionSelectorScheme,
        )
    }

    #[test]
    fn rejected_version_never_queries_service() {
        let resolver = resolver(Ok(()));

        let outcome = resolver
            .resolve(&request("com.example.foo").with_version("1.0-SNAPSHOT"))
            .unwrap();

        assert!(!outcome.is_found());
        assert_eq!(outcome.attempts().len(), 2);
        assert_eq!(resolver.service().queries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn existence_check_is_detached_and_not_cached() {
        let resolver = resolver(Ok(()));
        let req = request("com.example.foo").with_version("1.0");

        resolver.resolve(&req).unwrap();
        resolver.resolve(&req).unwrap();

        assert_eq!(resolver.service().queries.load(Ordering::SeqCst), 2);
        assert_eq!(*resolver.service().last_query.lock().unwrap(), Some(false));
    }

    #[test]
    fn transient_failure_counts_as_missing() {
        let resolver = resolver(Err(ResolveError::Unavailable {
            repository: "first".to_string(),
            message: "timed out".to_string(),
        }));

        let outcome = resolver
            .resolve(&request("com.example.foo").with_version("1.0"))
            .unwrap();

        assert_eq!(
            outcome.attempts()[0].reason.to_string(),
            "Could not resolve plugin artifact 'com.example.foo:com.example.foo.gradle.plugin:1.0'"
        );
    }

    #[test]
    fn found_carries_request_id_and_module_coordinate() {
        let resolver = resolver(Ok(()));
        let req = request("com.example.foo")
            .with_module(ModuleSelector::new("g", "n").with_version("1.0"));

        let outcome = resolver.resolve(&req).unwrap();

        let ResolutionOutcome::Found {
            source_label,
            resolution,
        } = outcome
        else {
            panic!("expected plugin to be found");
        };
        assert_eq!(source_label, SOURCE_LABEL);
        assert_eq!(resolution.plugin_id().id(), "com.example.foo");
        assert_eq!(resolution.coordinate().notation(), "g:n:1.0");
    }

    #[test]
    fn invalid_module_is_a_hard_error() {
        let resolver = resolver(Ok(()));
        let req = request("com.example.foo").with_module(ModuleSelector::new("", "n"));

        assert!(resolver.resolve(&req).is_err());
        assert_eq!(resolver.service().queries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn create_with_defaults_adds_portal_once() {
        let resolver = ArtifactRepositoriesResolver::create_with_defaults(
            CatalogResolutionService::new(),
            DefaultVersionSelectorScheme,
        );
        assert_eq!(resolver.service().repositories().len(), 1);
        assert!(
            resolver
                .service()
                .repositories()
                .get(PLUGIN_PORTAL_NAME)
                .is_some()
        );

        let again = ArtifactRepositoriesResolver::create_with_defaults(
            resolver.into_service(),
            DefaultVersionSelectorScheme,
        );
        assert_eq!(again.service().repositories().len(), 1);
    }

    #[test]
    fn create_with_defaults_keeps_configured_repositories() {
        let resolver = ArtifactRepositoriesResolver::create_with_defaults(
            ScriptedService::new(&["internal"], Ok(())),
            DefaultVersionSelectorScheme,
        );

        assert_eq!(
            resolver.service().repositories().names().collect::<Vec<_>>(),
            vec!["internal"]
        );
    }

    #[test]
    fn no_repositories_yields_empty_report() {
        let service = ScriptedService::new(
            &[],
            Err(ResolveError::NotFound {
                notation: String::new(),
            }),
        );
        let resolver = ArtifactRepositoriesResolver::new(service, DefaultVersionSelectorScheme);

        let outcome = resolver
            .resolve(&request("com.example.foo").with_version("1.0"))
            .unwrap();

        assert_eq!(outcome, ResolutionOutcome::NotFound { attempts: vec![] });
    }
}
