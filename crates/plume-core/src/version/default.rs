//! Build-tool version selector grammar.

use super::{VersionSelector, VersionSelectorScheme};

const LATEST_PREFIX: &str = "latest.";
const PLUS: char = '+';

/// Shape of a selector in the build-tool grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSelectorKind {
    /// A single fixed version: `1.0.2`
    Exact,
    /// Any version starting with a prefix: `1.+`, or `+` for any version
    Prefix(String),
    /// Newest version with at least the given status: `latest.release`
    Latest(String),
    /// Bounded or half-open range: `[1.0,2.0)`, `]1.0,)`
    Range {
        lower: Option<String>,
        lower_inclusive: bool,
        upper: Option<String>,
        upper_inclusive: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultVersionSelector {
    selector: String,
    kind: DefaultSelectorKind,
}

impl DefaultVersionSelector {
    pub fn kind(&self) -> &DefaultSelectorKind {
        &self.kind
    }
}

impl VersionSelector for DefaultVersionSelector {
    fn is_dynamic(&self) -> bool {
        !matches!(self.kind, DefaultSelectorKind::Exact)
    }

    fn as_str(&self) -> &str {
        &self.selector
    }
}

/// Parses `1.+`, `latest.<status>` and bracket ranges as dynamic selectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionSelectorScheme;

impl DefaultVersionSelectorScheme {
    pub fn parse(&self, version: &str) -> DefaultVersionSelector {
        DefaultVersionSelector {
            selector: version.to_string(),
            kind: parse_kind(version),
        }
    }
}

impl VersionSelectorScheme for DefaultVersionSelectorScheme {
    fn parse_selector(&self, version: &str) -> Box<dyn VersionSelector> {
        Box::new(self.parse(version))
    }
}

fn parse_kind(version: &str) -> DefaultSelectorKind {
    if let Some(range) = parse_range(version) {
        return range;
    }
    if let Some(prefix) = version.strip_suffix(PLUS) {
        return DefaultSelectorKind::Prefix(prefix.to_string());
    }
    if let Some(status) = version.strip_prefix(LATEST_PREFIX)
        && !status.is_empty()
    {
        return DefaultSelectorKind::Latest(status.to_string());
    }
    DefaultSelectorKind::Exact
}

/// `[` or `(`/`]` open a range; `]` or `)`/`[` close it.
fn parse_range(version: &str) -> Option<DefaultSelectorKind> {
    let mut chars = version.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;

    let lower_inclusive = match open {
        '[' => true,
        '(' | ']' => false,
        _ => return None,
    };
    let upper_inclusive = match close {
        ']' => true,
        ')' | '[' => false,
        _ => return None,
    };

    let (lower, upper) = chars.as_str().split_once(',')?;
    if upper.contains(',') {
        return None;
    }
    let bound = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    let (lower, upper) = (bound(lower), bound(upper));
    if lower.is_none() && upper.is_none() {
        return None;
    }

    Some(DefaultSelectorKind::Range {
        lower,
        lower_inclusive,
        upper,
        upper_inclusive,
    })
}
