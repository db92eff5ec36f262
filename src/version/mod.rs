//! Version compatibility layer for the monitored components
//!
//! Turns the versions reported by Wake and Anvil into verdicts against the
//! bounds declared in the dependency manifest.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Manifest   │────▶│   Policy    │────▶│   Compat    │◀──── Probe
//! │   (load)    │     │  (bounds)   │     │ (evaluate)  │   (observed)
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │  Severity   │
//!                                         │ (aggregate) │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`compat`]: `Verdict` and the `evaluate` classification
//! - [`component`]: monitored components (Wake, Anvil)
//! - [`error`]: manifest and policy errors
//! - [`manifest`]: `external-dependencies.json` loading
//! - [`policy`]: minimum/recommended/maximum bounds per component
//! - [`probe`]: trait for observed version readings
//! - [`semver`]: version parsing and loose coercion
//! - [`severity`]: most-severe-verdict aggregation

pub mod compat;
pub mod component;
pub mod error;
pub mod manifest;
pub mod policy;
pub mod probe;
pub mod semver;
pub mod severity;
