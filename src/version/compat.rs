//! Version compatibility classification

use serde::{Deserialize, Serialize};

use crate::version::policy::VersionPolicy;
use crate::version::semver::coerce;

/// Compatibility of an observed version with a component's policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// At or above the recommended version and below the maximum
    Compatible,
    /// Outdated (below recommended) or untested (at or above maximum)
    Warning,
    /// Below the minimum supported version
    Error,
    /// Version missing or unparseable
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Compatible => "compatible",
            Verdict::Warning => "warning",
            Verdict::Error => "error",
            Verdict::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an observed version string against a policy.
///
/// Checks run in order, first match wins:
/// 1. absent or uncoercible -> `Unknown`
/// 2. below `minimum` -> `Error`
/// 3. at or above `maximum` -> `Warning`
/// 4. below `recommended` -> `Warning`
/// 5. otherwise -> `Compatible`
pub fn evaluate(observed: Option<&str>, policy: &VersionPolicy) -> Verdict {
    let Some(version) = observed.and_then(coerce) else {
        return Verdict::Unknown;
    };

    if version < policy.minimum {
        return Verdict::Error;
    }

    if policy.maximum.as_ref().is_some_and(|max| version >= *max) {
        return Verdict::Warning;
    }

    if version < policy.recommended {
        return Verdict::Warning;
    }

    Verdict::Compatible
}
