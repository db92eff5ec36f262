//! External dependency manifest (`external-dependencies.json`)

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::EMBEDDED_MANIFEST;
use crate::version::component::Component;
use crate::version::error::ManifestError;
use crate::version::policy::{PolicySet, VersionPolicy};

/// Declared external dependencies, in manifest order
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DependencyManifest {
    pub dependencies: IndexMap<String, DependencyEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DependencyEntry {
    #[serde(default)]
    pub description: Option<String>,
    pub versions: VersionBounds,
}

/// Raw version bounds as written in the manifest
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VersionBounds {
    pub minimum: String,
    pub recommended: String,
    #[serde(default)]
    pub maximum: Option<String>,
}

impl DependencyManifest {
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        info!("Loading dependency manifest from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Manifest shipped with the extension
    pub fn embedded() -> Result<Self, ManifestError> {
        Self::from_json(EMBEDDED_MANIFEST)
    }

    /// Version policy declared for a component
    pub fn policy(&self, component: Component) -> Result<VersionPolicy, ManifestError> {
        let entry = self
            .dependencies
            .get(component.as_str())
            .ok_or_else(|| ManifestError::MissingComponent(component.as_str().to_string()))?;

        let bounds = &entry.versions;
        let policy = VersionPolicy::new(
            &bounds.minimum,
            &bounds.recommended,
            bounds.maximum.as_deref(),
        )?;

        debug!(
            "Policy for {}: minimum {}, recommended {}",
            component,
            policy.minimum,
            policy.recommended_range()
        );

        Ok(policy)
    }

    /// Policies for all monitored components
    pub fn policies(&self) -> Result<PolicySet, ManifestError> {
        Ok(PolicySet::new(
            self.policy(Component::Wake)?,
            self.policy(Component::Anvil)?,
        ))
    }
}
