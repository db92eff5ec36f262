//! Status-bar text for the Wake language client

use crate::config::RESTART_CLIENT_COMMAND;
use crate::status::report::StatusReadings;
use crate::version::compat::Verdict;

const RUNNING_HEADINGS: &[&str] = &["*Wake LSP is running*"];
const STOPPED_HEADINGS: &[&str] = &[
    "*Cannot connect to Wake LSP, which is required by Solidity (Wake)*",
    "*Click to restart client*",
];
const STARTING_HEADINGS: &[&str] = &["*Connecting to Wake LSP...*"];

/// Connectivity phase reported by the language client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Starting,
    Running,
    Stopped,
}

/// Background emphasis requested for the status item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Error,
}

impl Highlight {
    /// Theme color id understood by the editor
    pub fn theme_color(&self) -> &'static str {
        match self {
            Highlight::Error => "statusBarItem.errorBackground",
        }
    }
}

/// Everything the host needs to draw the status item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub text: String,
    pub tooltip: String,
    pub highlight: Option<Highlight>,
    pub command: Option<&'static str>,
}

/// Build the status item for the given client state and readings.
///
/// `installation` describes how Wake is reached (see
/// [`WakeConfig::installation_description`](crate::config::WakeConfig::installation_description)).
pub fn render_status(
    state: ClientState,
    readings: &StatusReadings,
    installation: &str,
) -> StatusSummary {
    let severity = readings.severity();
    let wake_version = readings.wake.version_text();
    let installation = if installation.is_empty() {
        "-"
    } else {
        installation
    };

    let (icon, headings) = match state {
        ClientState::Running if severity == Verdict::Warning => ("warning", RUNNING_HEADINGS),
        ClientState::Running => ("check-all", RUNNING_HEADINGS),
        ClientState::Stopped => ("refresh", STOPPED_HEADINGS),
        ClientState::Starting => ("sync~spin", STARTING_HEADINGS),
    };

    let mut lines: Vec<String> = headings.iter().map(|h| h.to_string()).collect();
    lines.push("---".to_string());
    lines.push(readings.wake.tooltip_line());
    lines.push(format!("Wake Installation Method: `{}`", installation));
    lines.push(readings.anvil.tooltip_line());

    let (highlight, command) = match state {
        ClientState::Stopped => (Some(Highlight::Error), Some(RESTART_CLIENT_COMMAND)),
        ClientState::Running | ClientState::Starting if severity == Verdict::Error => {
            (Some(Highlight::Error), None)
        }
        ClientState::Running | ClientState::Starting => (None, None),
    };

    StatusSummary {
        text: format!("$({}) Wake v{}", icon, wake_version),
        tooltip: lines.join("\n\n"),
        highlight,
        command,
    }
}
