use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

/// Largest integer a version component may hold; larger values are rejected
const MAX_COMPONENT: u64 = 9_007_199_254_740_991;

/// First run of up to three dot-separated numeric components, not embedded in
/// a longer digit sequence.
static COERCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("coerce pattern is valid")
});

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Coerce a loosely formed version string into the nearest release version.
///
/// Scans for the first `major[.minor[.patch]]` run anywhere in the input and
/// pads missing components with zeros. Pre-release and build suffixes are
/// discarded, so the result is always a plain release. Components above
/// 2^53 - 1 make the whole string uncoercible.
///
/// Examples:
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.5.2-beta" -> Version(1, 5, 2)
/// - "anvil 1.2.3-nightly (abc 2025-01-01)" -> Version(1, 2, 3)
/// - "nightly" -> None
pub fn coerce(version: &str) -> Option<Version> {
    let captures = COERCE_RE.captures(version)?;

    let component = |index: usize| -> Option<u64> {
        match captures.get(index) {
            Some(m) => m
                .as_str()
                .parse::<u64>()
                .ok()
                .filter(|n| *n <= MAX_COMPONENT),
            None => Some(0),
        }
    };

    Some(Version::new(component(1)?, component(2)?, component(3)?))
}
