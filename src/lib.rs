//! Status and state core of the Tools for Solidity editor extension.
//!
//! - [`version`]: version policies, compatibility verdicts and severity aggregation
//! - [`state`]: observable state containers and the deployed-contract registry
//! - [`status`]: status-bar text built from the monitored components' verdicts
//! - [`config`]: extension settings, constants and data paths
//! - [`logging`]: tracing subscriber setup for the binary

pub mod config;
pub mod logging;
pub mod state;
pub mod status;
pub mod version;
