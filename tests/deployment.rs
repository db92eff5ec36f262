use std::cell::RefCell;
use std::rc::Rc;

use tfs_status::state::{
    Address, DEPLOYED_CONTRACTS_KEY, DeployedContract, DeploymentRegistry, DeploymentState,
    DuplicatePolicy, StateEvent,
};

fn record_notifications(registry: &DeploymentRegistry) -> Rc<RefCell<Vec<DeploymentState>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    registry
        .subscribe(move |event: &StateEvent<DeploymentState>| {
            assert_eq!(event.key.as_str(), DEPLOYED_CONTRACTS_KEY);
            sink.borrow_mut().push((*event.state).clone());
        })
        .detach();
    seen
}

#[test]
fn every_mutation_notifies_exactly_once() {
    let registry = DeploymentRegistry::new();
    let seen = record_notifications(&registry);
    let a = Address::from("0xA");
    let missing = Address::from("0xdead");

    registry.add(DeployedContract::new("0xA", "Token")).unwrap();
    registry.add(DeployedContract::new("0xB", "Vault")).unwrap();
    registry.set_label(&a, Some("mine".to_string()));
    registry.update(DeployedContract::new("0xB", "Vault v2"));
    registry.remove(&missing);
    registry.update(DeployedContract::new("0xC", "Ghost"));
    registry.set_label(&missing, None);
    registry.remove(&a);

    assert_eq!(seen.borrow().len(), 8);
}

#[test]
fn rejected_add_is_the_only_mutation_without_notification() {
    let registry = DeploymentRegistry::with_policy(DuplicatePolicy::Reject);
    let seen = record_notifications(&registry);

    registry.add(DeployedContract::new("0xA", "Token")).unwrap();
    assert!(registry.add(DeployedContract::new("0xA", "Token v2")).is_err());
    registry.set_label(&Address::from("0xA"), Some("mine".to_string()));
    registry.remove(&Address::from("0xB"));

    // four calls, one refused
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(registry.len(), 1);
}

#[test]
fn notifications_carry_each_intermediate_state_in_order() {
    let registry = DeploymentRegistry::new();
    let seen = record_notifications(&registry);

    registry.add(DeployedContract::new("0xA", "Token")).unwrap();
    registry.set_label(&Address::from("0xA"), Some("mine".to_string()));
    registry.remove(&Address::from("0xA"));

    assert_eq!(
        *seen.borrow(),
        vec![
            vec![DeployedContract::new("0xA", "Token")],
            vec![DeployedContract::new("0xA", "Token").with_label("mine")],
            vec![],
        ]
    );
}

#[test]
fn snapshots_are_not_affected_by_later_mutations() {
    let registry = DeploymentRegistry::new();
    registry.add(DeployedContract::new("0xA", "Token")).unwrap();
    let snapshot = registry.contracts();

    registry.set_label(&Address::from("0xA"), Some("renamed".to_string()));
    registry.add(DeployedContract::new("0xB", "Vault")).unwrap();

    assert_eq!(*snapshot, vec![DeployedContract::new("0xA", "Token")]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn subscriber_may_mutate_registry_reentrantly() {
    let registry = Rc::new(DeploymentRegistry::new());
    let sizes = Rc::new(RefCell::new(Vec::new()));

    let handle = Rc::clone(&registry);
    let sink = Rc::clone(&sizes);
    let subscription = registry.subscribe(move |event: &StateEvent<DeploymentState>| {
        sink.borrow_mut().push(event.state.len());
        // Label every freshly added contract
        if let Some(last) = event.state.last() {
            if last.label.is_none() {
                handle.set_label(&last.address, Some(format!("#{}", event.state.len())));
            }
        }
    });

    registry.add(DeployedContract::new("0xA", "Token")).unwrap();

    assert_eq!(*sizes.borrow(), vec![1, 1]);
    assert_eq!(
        registry.find(&Address::from("0xA")).unwrap().label.as_deref(),
        Some("#1")
    );
    subscription.unsubscribe();
}

#[test]
fn state_restores_from_persisted_json() {
    let registry = DeploymentRegistry::new();
    registry
        .add(DeployedContract::new("0xA", "Token").with_label("mine"))
        .unwrap();
    let persisted = serde_json::to_string(&*registry.contracts()).unwrap();

    let restored = DeploymentRegistry::new();
    restored
        .container()
        .set(serde_json::from_str::<DeploymentState>(&persisted).unwrap());

    assert_eq!(*restored.contracts(), *registry.contracts());
}
