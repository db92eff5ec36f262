//! Status indicator content for the Wake language client
//!
//! - [`report`]: per-component readings, verdicts and tooltip lines
//! - [`render`]: status text, tooltip, highlight and command per client state

pub mod render;
pub mod report;

pub use render::{ClientState, Highlight, StatusSummary, render_status};
pub use report::{ComponentReport, StatusReadings};
