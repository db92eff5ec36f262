//! Source of observed component versions

#[cfg(test)]
use mockall::automock;

use crate::version::component::Component;

/// Reports the version each monitored component announced.
///
/// Probes that failed or have not finished yet report `None`; the
/// compatibility check treats that as an unknown version.
#[cfg_attr(test, automock)]
pub trait VersionProbe {
    fn observed_version(&self, component: Component) -> Option<String>;
}

/// Fixed readings, e.g. from the command line or an analytics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
    pub wake: Option<String>,
    pub anvil: Option<String>,
}

impl VersionProbe for StaticProbe {
    fn observed_version(&self, component: Component) -> Option<String> {
        match component {
            Component::Wake => self.wake.clone(),
            Component::Anvil => self.anvil.clone(),
        }
    }
}
