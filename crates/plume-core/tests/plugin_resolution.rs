use url::Url;

use plume_core::prelude::*;
use plume_core::repository::PLUGIN_PORTAL_NAME;

fn catalog(names: &[&str]) -> CatalogResolutionService {
    let mut service = CatalogResolutionService::new();
    for name in names {
        let url = Url::parse(&format!("https://{}.example.com/maven", name)).unwrap();
        service.add_repository(Repository::new(*name, url)).unwrap();
    }
    service
}

fn request(id: &str) -> PluginRequest {
    PluginRequest::new(PluginId::new(id).unwrap())
}

fn resolve(
    service: CatalogResolutionService,
    request: &PluginRequest,
) -> ResolutionOutcome {
    ArtifactRepositoriesResolver::new(service, DefaultVersionSelectorScheme)
        .resolve(request)
        .unwrap()
}

fn assert_reported_everywhere(outcome: &ResolutionOutcome, repositories: &[&str], needle: &str) {
    let ResolutionOutcome::NotFound { attempts } = outcome else {
        panic!("expected not found, got {:?}", outcome);
    };
    let names: Vec<_> = attempts.iter().map(|a| a.repository.as_str()).collect();
    assert_eq!(names, repositories);
    for attempt in attempts {
        let reason = attempt.reason.to_string();
        assert!(reason.contains(needle), "'{}' does not contain '{}'", reason, needle);
    }
}

#[test]
fn missing_version_reported_for_every_repository() {
    let outcome = resolve(catalog(&["a", "b", "c"]), &request("com.example.foo"));

    assert_reported_everywhere(&outcome, &["a", "b", "c"], "must include a version number");
}

#[test]
fn missing_module_version_reported_for_every_repository() {
    let req = request("com.example.foo")
        .with_version("1.0")
        .with_module(ModuleSelector::new("g", "n"));

    let outcome = resolve(catalog(&["a", "b"]), &req);

    assert_reported_everywhere(&outcome, &["a", "b"], "must include a version number");
}

#[test]
fn snapshot_versions_are_rejected() {
    let mut service = catalog(&["a", "b"]);
    service.publish(
        "a",
        MarkerCoordinate::new(
            "com.example.foo",
            "com.example.foo.gradle.plugin",
            Some("1.0-SNAPSHOT".to_string()),
        ),
    );

    let outcome = resolve(service, &request("com.example.foo").with_version("1.0-SNAPSHOT"));

    assert_reported_everywhere(&outcome, &["a", "b"], "snapshot plugin versions are not supported");
}

#[test]
fn dynamic_versions_are_rejected() {
    for version in ["1.+", "latest.release", "[1.0,2.0)"] {
        let outcome = resolve(catalog(&["a", "b"]), &request("com.example.foo").with_version(version));

        assert_reported_everywhere(&outcome, &["a", "b"], "dynamic plugin versions are not supported");
    }
}

#[test]
fn module_selector_found_and_applied() {
    let mut service = catalog(&["a"]);
    service.publish("a", MarkerCoordinate::new("g", "n", Some("1.0".to_string())));
    let req = request("com.example.foo")
        .with_module(ModuleSelector::new("g", "n").with_version("1.0"));

    let outcome = resolve(service, &req);

    let resolution = outcome.resolution().expect("plugin should be found");
    assert_eq!(resolution.plugin_id(), &req.id);

    let mut context = ClasspathContext::new();
    resolution.apply(&mut context);
    assert_eq!(context.classpath(), vec!["g:n:1.0"]);
}

#[test]
fn bare_id_not_found_names_marker_coordinate() {
    let outcome = resolve(
        catalog(&["a", "b"]),
        &request("com.example.foo").with_version("2.0"),
    );

    assert_reported_everywhere(
        &outcome,
        &["a", "b"],
        "com.example.foo:com.example.foo.gradle.plugin:2.0",
    );
    assert_eq!(
        outcome.attempts()[0].reason.to_string(),
        "Could not resolve plugin artifact 'com.example.foo:com.example.foo.gradle.plugin:2.0'"
    );
}

#[test]
fn bare_id_found_through_marker() {
    let mut service = catalog(&["a", "b"]);
    service.publish(
        "b",
        MarkerCoordinate::new(
            "com.example.foo",
            "com.example.foo.gradle.plugin",
            Some("2.0".to_string()),
        ),
    );

    let outcome = resolve(service, &request("com.example.foo").with_version("2.0"));

    let ResolutionOutcome::Found { source_label, resolution } = outcome else {
        panic!("expected plugin to be found");
    };
    assert_eq!(source_label, "Plugin Artifact Repositories");
    assert_eq!(
        resolution.coordinate().notation(),
        "com.example.foo:com.example.foo.gradle.plugin:2.0"
    );
}

#[test]
fn unreachable_repository_reports_not_found() {
    let mut service = catalog(&["a", "b"]);
    service.mark_unavailable("a", "connection reset");

    let outcome = resolve(service, &request("com.example.foo").with_version("2.0"));

    assert_reported_everywhere(&outcome, &["a", "b"], "Could not resolve plugin artifact");
}

#[test]
fn semver_scheme_rejects_requirements() {
    let resolver = ArtifactRepositoriesResolver::new(catalog(&["a"]), SemverSelectorScheme);

    let outcome = resolver
        .resolve(&request("com.example.foo").with_version("^1.2"))
        .unwrap();
    assert_reported_everywhere(&outcome, &["a"], "dynamic plugin versions are not supported");

    let outcome = resolver
        .resolve(&request("com.example.foo").with_version("1.2.0"))
        .unwrap();
    assert_reported_everywhere(&outcome, &["a"], "Could not resolve plugin artifact");
}

#[test]
fn create_with_defaults_is_idempotent() {
    let resolver = ArtifactRepositoriesResolver::create_with_defaults(
        CatalogResolutionService::new(),
        DefaultVersionSelectorScheme,
    );
    assert_eq!(resolver.service().repositories().len(), 1);

    let resolver = ArtifactRepositoriesResolver::create_with_defaults(
        resolver.into_service(),
        DefaultVersionSelectorScheme,
    );
    assert_eq!(resolver.service().repositories().len(), 1);

    let outcome = resolver
        .resolve(&request("com.example.foo").with_version("2.0"))
        .unwrap();
    assert_reported_everywhere(&outcome, &[PLUGIN_PORTAL_NAME], "Could not resolve");
}

#[test]
fn composite_falls_through_to_next_resolver() {
    let mut second = catalog(&["second"]);
    second.publish(
        "second",
        MarkerCoordinate::new("a.b", "a.b.gradle.plugin", Some("1.0".to_string())),
    );
    let composite = CompositeResolver::new()
        .with(ArtifactRepositoriesResolver::new(catalog(&["first"]), DefaultVersionSelectorScheme))
        .with(ArtifactRepositoriesResolver::new(second, DefaultVersionSelectorScheme));

    let outcome = composite.resolve(&request("a.b").with_version("1.0")).unwrap();

    assert!(outcome.is_found());
}

#[test]
fn composite_of_catalogs_is_shared_across_threads() {
    let mut published = catalog(&["published"]);
    published.publish(
        "published",
        MarkerCoordinate::new("a.b", "a.b.gradle.plugin", Some("1.0".to_string())),
    );
    let composite = CompositeResolver::new()
        .with(ArtifactRepositoriesResolver::new(catalog(&["empty"]), DefaultVersionSelectorScheme))
        .with(ArtifactRepositoriesResolver::new(published, SemverSelectorScheme));

    std::thread::scope(|scope| {
        let found = scope.spawn(|| composite.resolve(&request("a.b").with_version("1.0")));
        let missing = scope.spawn(|| composite.resolve(&request("a.b").with_version("2.0")));

        assert!(found.join().unwrap().unwrap().is_found());
        let outcome = missing.join().unwrap().unwrap();
        let names: Vec<_> = outcome.attempts().iter().map(|a| a.repository.as_str()).collect();
        assert_eq!(names, vec!["empty", "published"]);
    });
}

#[test]
fn derive_coordinate_is_deterministic() {
    let req = request("com.example.foo").with_version("2.0");
    assert_eq!(MarkerCoordinate::derive(&req), MarkerCoordinate::derive(&req));
}
