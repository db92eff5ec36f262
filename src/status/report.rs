//! Per-component version readings and their verdicts

use crate::version::compat::{Verdict, evaluate};
use crate::version::component::Component;
use crate::version::policy::{PolicySet, VersionPolicy};
use crate::version::probe::VersionProbe;
use crate::version::severity::aggregate;

/// Observed version of one component, classified against its policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    pub component: Component,
    pub observed: Option<String>,
    pub verdict: Verdict,
    pub policy: VersionPolicy,
}

impl ComponentReport {
    pub fn new(component: Component, observed: Option<String>, policy: &VersionPolicy) -> Self {
        let verdict = evaluate(observed.as_deref(), policy);
        Self {
            component,
            observed,
            verdict,
            policy: policy.clone(),
        }
    }

    /// Observed version for display, `-` when nothing was reported
    pub fn version_text(&self) -> &str {
        match self.observed.as_deref() {
            Some(version) if !version.is_empty() => version,
            _ => "-",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.verdict {
            Verdict::Compatible => "✓",
            Verdict::Warning | Verdict::Error => "⚠",
            Verdict::Unknown => "",
        }
    }

    /// Suffix explaining a non-compatible verdict, empty otherwise
    pub fn message(&self) -> String {
        let range = self.policy.recommended_range();
        match self.verdict {
            Verdict::Error => format!(" (incompatible, recommended {})", range),
            Verdict::Warning => format!(" (untested, recommended {})", range),
            Verdict::Compatible | Verdict::Unknown => String::new(),
        }
    }

    /// Tooltip line, e.g. ``Wake Version: `4.21.1` ✓``
    pub fn tooltip_line(&self) -> String {
        format!(
            "{} Version: `{}` {}{}",
            self.component,
            self.version_text(),
            self.icon(),
            self.message()
        )
    }
}

/// Reports of all monitored components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReadings {
    pub wake: ComponentReport,
    pub anvil: ComponentReport,
}

impl StatusReadings {
    pub fn collect<P>(probe: &P, policies: &PolicySet) -> Self
    where
        P: VersionProbe + ?Sized,
    {
        let report = |component: Component| {
            ComponentReport::new(
                component,
                probe.observed_version(component),
                policies.get(component),
            )
        };

        Self {
            wake: report(Component::Wake),
            anvil: report(Component::Anvil),
        }
    }

    /// Most severe verdict across components
    pub fn severity(&self) -> Verdict {
        aggregate([self.wake.verdict, self.anvil.verdict])
    }
}
