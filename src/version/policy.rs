//! Version bounds per monitored component

use semver::Version;

use crate::version::component::Component;
use crate::version::error::ManifestError;
use crate::version::semver::parse_version;

/// Minimum, recommended and optional maximum version of a component.
///
/// `maximum` is exclusive: versions at or above it are untested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPolicy {
    pub minimum: Version,
    pub recommended: Version,
    pub maximum: Option<Version>,
}

impl VersionPolicy {
    /// Build a policy from manifest strings.
    ///
    /// Partial bounds ("1.2") are padded. A missing or empty `maximum` means
    /// there is no upper bound.
    pub fn new(
        minimum: &str,
        recommended: &str,
        maximum: Option<&str>,
    ) -> Result<Self, ManifestError> {
        let maximum = match maximum.map(str::trim).filter(|m| !m.is_empty()) {
            Some(max) => Some(parse_bound("maximum", max)?),
            None => None,
        };

        Ok(Self {
            minimum: parse_bound("minimum", minimum)?,
            recommended: parse_bound("recommended", recommended)?,
            maximum,
        })
    }

    /// Range shown to the user as the recommended versions,
    /// e.g. `>=4.21.1 <5.0.0`.
    pub fn recommended_range(&self) -> String {
        match &self.maximum {
            Some(max) => format!(">={} <{}", self.recommended, max),
            None => format!(">={}", self.recommended),
        }
    }
}

fn parse_bound(bound: &'static str, value: &str) -> Result<Version, ManifestError> {
    parse_version(value.trim()).ok_or_else(|| ManifestError::InvalidVersion {
        bound,
        value: value.to_string(),
    })
}

/// Policies of every monitored component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySet {
    wake: VersionPolicy,
    anvil: VersionPolicy,
}

impl PolicySet {
    pub fn new(wake: VersionPolicy, anvil: VersionPolicy) -> Self {
        Self { wake, anvil }
    }

    pub fn get(&self, component: Component) -> &VersionPolicy {
        match component {
            Component::Wake => &self.wake,
            Component::Anvil => &self.anvil,
        }
    }
}
