use thiserror::Error;

use crate::state::deployment::Address;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeploymentError {
    #[error("Contract already registered at address {0}")]
    DuplicateAddress(Address),
}
