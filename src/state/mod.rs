//! Observable panel state
//!
//! - [`container`]: generic single-value container with subscriptions
//! - [`deployment`]: registry of deployed contracts built on a container
//! - [`error`]: registry errors
//!
//! All types here are single-threaded (`Rc`-based) and meant to live on the
//! host's event loop.

pub mod container;
pub mod deployment;
pub mod error;

pub use container::{StateContainer, StateEvent, StateKey, Subscription, WeakStateContainer};
pub use deployment::{
    Address, DEPLOYED_CONTRACTS_KEY, DeployedContract, DeploymentRegistry, DeploymentState,
    DuplicatePolicy,
};
pub use error::DeploymentError;
