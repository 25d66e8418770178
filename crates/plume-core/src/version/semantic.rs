//! Semantic version requirements as selectors.

use semver::{Op, Version, VersionReq};

use super::{VersionSelector, VersionSelectorScheme};

#[derive(Debug, Clone)]
pub struct SemverSelector {
    selector: String,
    dynamic: bool,
}

impl VersionSelector for SemverSelector {
    fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    fn as_str(&self) -> &str {
        &self.selector
    }
}

/// Interprets versions the way Cargo does.
///
/// A full version (`1.2.3`) or an `=1.2.3` requirement is exact. Any other
/// requirement, including a bare `1.2` which means `^1.2`, is dynamic. Text
/// that is neither a version nor a requirement is kept as an exact literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverSelectorScheme;

impl SemverSelectorScheme {
    pub fn parse(&self, version: &str) -> SemverSelector {
        SemverSelector {
            selector: version.to_string(),
            dynamic: is_dynamic(version.trim()),
        }
    }
}

impl VersionSelectorScheme for SemverSelectorScheme {
    fn parse_selector(&self, version: &str) -> Box<dyn VersionSelector> {
        Box::new(self.parse(version))
    }
}

fn is_dynamic(version: &str) -> bool {
    if Version::parse(version).is_ok() {
        return false;
    }
    match VersionReq::parse(version) {
        Ok(req) => !is_pinned(&req),
        Err(_) => false,
    }
}

fn is_pinned(req: &VersionReq) -> bool {
    match req.comparators.as_slice() {
        [only] => only.op == Op::Exact && only.minor.is_some() && only.patch.is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic(version: &str) -> bool {
        SemverSelectorScheme.parse_selector(version).is_dynamic()
    }

    #[test]
    fn full_versions_are_exact() {
        assert!(!dynamic("1.2.3"));
        assert!(!dynamic("1.2.3-beta.1"));
        assert!(!dynamic("=1.2.3"));
    }

    #[test]
    fn requirements_are_dynamic() {
        assert!(dynamic("^1.2.3"));
        assert!(dynamic("~1.2"));
        assert!(dynamic(">=1.0, <2.0"));
        assert!(dynamic("1.*"));
        assert!(dynamic("*"));
        assert!(dynamic("1.2"));
        assert!(dynamic("=1.2"));
    }

    #[test]
    fn unparseable_text_is_exact() {
        assert!(!dynamic("release-2024"));
        assert!(!dynamic("latest.release"));
    }
}
