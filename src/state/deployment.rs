//! Registry of contracts deployed from the Sake panel

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::container::{StateContainer, StateEvent, StateKey, Subscription};
use crate::state::error::DeploymentError;

/// Key under which the deployed contracts are addressed and persisted
pub const DEPLOYED_CONTRACTS_KEY: &str = "deployedContracts";

/// On-chain address of a deployed contract
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// A deployed contract instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedContract {
    pub address: Address,
    /// User-assigned label shown instead of the contract name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Contract name from the compilation output
    pub name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl DeployedContract {
    pub fn new(address: impl Into<Address>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: None,
            name: name.into(),
            abi: serde_json::Value::Array(Vec::new()),
            chain_id: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

pub type DeploymentState = Vec<DeployedContract>;

/// What `add` does when a contract with the same address is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Replace the existing record in place
    #[default]
    Replace,
    /// Append anyway, leaving several records with one address
    Append,
    /// Refuse with [`DeploymentError::DuplicateAddress`]; state is untouched
    /// and no notification is sent, so a rejected `add` is the one mutation
    /// call that does not produce a notification
    Reject,
}

/// Ordered collection of deployed contracts with change notification.
///
/// Every mutation builds a new sequence from the current snapshot and
/// replaces it in one step, notifying subscribers once per call even when
/// nothing matched. The exception is an `add` refused under
/// [`DuplicatePolicy::Reject`], which notifies no one.
#[derive(Debug)]
pub struct DeploymentRegistry {
    state: StateContainer<DeploymentState>,
    duplicates: DuplicatePolicy,
}

impl Default for DeploymentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    pub fn with_policy(duplicates: DuplicatePolicy) -> Self {
        Self {
            state: StateContainer::new(DEPLOYED_CONTRACTS_KEY, Vec::new()),
            duplicates,
        }
    }

    pub fn key(&self) -> &StateKey {
        self.state.key()
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Underlying container, for hosts that persist or restore the whole state
    pub fn container(&self) -> &StateContainer<DeploymentState> {
        &self.state
    }

    pub fn contracts(&self) -> Rc<DeploymentState> {
        self.state.get()
    }

    pub fn find(&self, address: &Address) -> Option<DeployedContract> {
        self.state
            .get()
            .iter()
            .find(|c| &c.address == address)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.get().is_empty()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&StateEvent<DeploymentState>) + 'static,
    {
        self.state.subscribe(handler)
    }

    /// Register a newly deployed contract
    pub fn add(&self, contract: DeployedContract) -> Result<(), DeploymentError> {
        let current = self.state.get();
        let exists = current.iter().any(|c| c.address == contract.address);

        let next = match (exists, self.duplicates) {
            (true, DuplicatePolicy::Reject) => {
                warn!("Rejected duplicate contract at {}", contract.address);
                return Err(DeploymentError::DuplicateAddress(contract.address));
            }
            (true, DuplicatePolicy::Replace) => {
                debug!("Replacing contract at {}", contract.address);
                replace_matching(&current, &contract)
            }
            _ => {
                debug!("Adding contract {} at {}", contract.name, contract.address);
                let mut next = Vec::with_capacity(current.len() + 1);
                next.extend(current.iter().cloned());
                next.push(contract);
                next
            }
        };

        self.state.set(next);
        Ok(())
    }

    /// Drop every contract at `address`; unknown addresses leave the list as is
    pub fn remove(&self, address: &Address) {
        debug!("Removing contract at {}", address);
        let next = self
            .state
            .get()
            .iter()
            .filter(|c| &c.address != address)
            .cloned()
            .collect();
        self.state.set(next);
    }

    /// Replace every contract sharing the record's address
    pub fn update(&self, contract: DeployedContract) {
        debug!("Updating contract at {}", contract.address);
        let next = replace_matching(&self.state.get(), &contract);
        self.state.set(next);
    }

    /// Set or clear the label of every contract at `address`
    pub fn set_label(&self, address: &Address, label: Option<String>) {
        debug!("Setting label of {} to {:?}", address, label);
        let next = self
            .state
            .get()
            .iter()
            .map(|c| {
                if &c.address == address {
                    DeployedContract {
                        label: label.clone(),
                        ..c.clone()
                    }
                } else {
                    c.clone()
                }
            })
            .collect();
        self.state.set(next);
    }
}

fn replace_matching(current: &[DeployedContract], contract: &DeployedContract) -> DeploymentState {
    current
        .iter()
        .map(|c| {
            if c.address == contract.address {
                contract.clone()
            } else {
                c.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::cell::Cell;

    fn addresses(registry: &DeploymentRegistry) -> Vec<String> {
        registry
            .contracts()
            .iter()
            .map(|c| c.address.to_string())
            .collect()
    }

    #[test]
    fn new_registry_is_empty_and_keyed() {
        let registry = DeploymentRegistry::new();

        assert!(registry.is_empty());
        assert_eq!(registry.key().as_str(), DEPLOYED_CONTRACTS_KEY);
        assert_eq!(registry.duplicate_policy(), DuplicatePolicy::Replace);
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let registry = DeploymentRegistry::new();

        registry.add(DeployedContract::new("0xB", "Token")).unwrap();
        registry.add(DeployedContract::new("0xA", "Vault")).unwrap();

        assert_eq!(addresses(&registry), vec!["0xB", "0xA"]);
    }

    #[test]
    fn add_then_set_label_yields_labelled_record() {
        let registry = DeploymentRegistry::new();

        registry.add(DeployedContract::new("0xA", "Token")).unwrap();
        registry.set_label(&Address::from("0xA"), Some("mine".to_string()));

        assert_eq!(
            *registry.contracts(),
            vec![DeployedContract::new("0xA", "Token").with_label("mine")]
        );
    }

    #[test]
    fn set_label_with_none_clears_label() {
        let registry = DeploymentRegistry::new();
        registry
            .add(DeployedContract::new("0xA", "Token").with_label("old"))
            .unwrap();
        registry.add(DeployedContract::new("0xB", "Vault").with_label("keep")).unwrap();

        registry.set_label(&Address::from("0xA"), None);

        let contracts = registry.contracts();
        assert_eq!(contracts[0].label, None);
        assert_eq!(contracts[1].label.as_deref(), Some("keep"));
    }

    #[rstest]
    #[case(DuplicatePolicy::Replace, vec!["0xA", "0xB"], "Token v2")]
    #[case(DuplicatePolicy::Append, vec!["0xA", "0xB", "0xA"], "Token")]
    fn add_duplicate_follows_policy(
        #[case] policy: DuplicatePolicy,
        #[case] expected_addresses: Vec<&str>,
        #[case] expected_first_name: &str,
    ) {
        let registry = DeploymentRegistry::with_policy(policy);
        registry.add(DeployedContract::new("0xA", "Token")).unwrap();
        registry.add(DeployedContract::new("0xB", "Vault")).unwrap();

        registry.add(DeployedContract::new("0xA", "Token v2")).unwrap();

        assert_eq!(addresses(&registry), expected_addresses);
        assert_eq!(registry.contracts()[0].name, expected_first_name);
    }

    #[test]
    fn add_duplicate_with_reject_policy_leaves_state_and_skips_notification() {
        let registry = DeploymentRegistry::with_policy(DuplicatePolicy::Reject);
        registry.add(DeployedContract::new("0xA", "Token")).unwrap();
        let notified = std::rc::Rc::new(Cell::new(0));
        let counter = std::rc::Rc::clone(&notified);
        let _sub = registry.subscribe(move |_| counter.set(counter.get() + 1));

        let result = registry.add(DeployedContract::new("0xA", "Other"));

        assert_eq!(
            result,
            Err(DeploymentError::DuplicateAddress(Address::from("0xA")))
        );
        assert_eq!(registry.contracts()[0].name, "Token");
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn remove_drops_matching_contract() {
        let registry = DeploymentRegistry::new();
        registry.add(DeployedContract::new("0xA", "Token")).unwrap();
        registry.add(DeployedContract::new("0xB", "Vault")).unwrap();

        registry.remove(&Address::from("0xA"));

        assert_eq!(addresses(&registry), vec!["0xB"]);
        assert_eq!(registry.find(&Address::from("0xA")), None);
    }

    #[test]
    fn remove_unknown_address_keeps_sequence() {
        let registry = DeploymentRegistry::new();
        registry.add(DeployedContract::new("0xA", "Token")).unwrap();
        registry.add(DeployedContract::new("0xB", "Vault")).unwrap();
        let before = registry.contracts();

        registry.remove(&Address::from("0xC"));

        assert_eq!(*registry.contracts(), *before);
    }

    #[test]
    fn update_replaces_record_wholesale() {
        let registry = DeploymentRegistry::new();
        registry
            .add(DeployedContract::new("0xA", "Token").with_label("mine"))
            .unwrap();
        let replacement = DeployedContract {
            abi: json!([{ "type": "function", "name": "mint" }]),
            chain_id: Some(31337),
            ..DeployedContract::new("0xA", "Token")
        };

        registry.update(replacement.clone());

        let matching: Vec<_> = registry
            .contracts()
            .iter()
            .filter(|c| c.address == replacement.address)
            .cloned()
            .collect();
        assert_eq!(matching, vec![replacement]);
    }

    #[test]
    fn update_unknown_address_keeps_sequence() {
        let registry = DeploymentRegistry::new();
        registry.add(DeployedContract::new("0xA", "Token")).unwrap();

        registry.update(DeployedContract::new("0xC", "Ghost"));

        assert_eq!(addresses(&registry), vec!["0xA"]);
    }

    #[test]
    fn contract_serializes_camel_case_without_empty_fields() {
        let contract = DeployedContract {
            chain_id: Some(1),
            ..DeployedContract::new("0xA", "Token")
        };

        assert_eq!(
            serde_json::to_value(&contract).unwrap(),
            json!({ "address": "0xA", "name": "Token", "abi": [], "chainId": 1 })
        );
    }
}
