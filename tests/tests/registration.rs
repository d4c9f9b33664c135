//! End-to-end registration scenarios over the in-memory collaborators.

use wlancollect_core::error::StoreError;
use wlancollect_core::model::{ChangeEvent, HostRecord};
use wlancollect_core::ports::{HostStore, RangeConfig};
use wlancollect_core::registration::{Outcome, RegistrationService};
use wlancollect_integration_tests::{
    deploy_host, record, service, service_with_hosts, service_with_token,
};
use wlancollect_rpc::memory::{
    InventoryValidator, MemoryHostStore, RecordingNotifier, StaticRangeConfig, StaticTokenContext,
};

#[test]
fn first_registration_adds_a_host() {
    let wiring = service("192.168.50.0/24");

    let outcome = wiring.service.track("aa:bb:cc:dd:ee:01", "printer1");

    assert_eq!(Outcome::Added, outcome);
    let records = wiring.store.records();
    assert_eq!(1, records.len());
    assert_eq!("printer1", records[0].name);
    assert_eq!("192.168.50.1", records[0].ip);
    assert_eq!("aa:bb:cc:dd:ee:01", records[0].mac);
    assert_eq!(vec![ChangeEvent::HostsChanged], wiring.notifier.events());
}

#[test]
fn repeated_announcement_is_a_noop() {
    let wiring = service("192.168.50.0/24");

    assert_eq!(Outcome::Added, wiring.service.track("AA:BB:CC:DD:EE:FF", "x"));
    assert_eq!(Outcome::NoOp, wiring.service.track("aa-bb-cc-dd-ee-ff", "y"));

    // The first allocation sticks; nothing was reassigned or added.
    let records = wiring.store.records();
    assert_eq!(1, records.len());
    assert_eq!("x", records[0].name);
    assert_eq!("192.168.50.1", records[0].ip);
    assert_eq!(1, wiring.notifier.events().len());
}

#[test]
fn allocation_skips_addresses_already_bound() {
    let wiring = service_with_hosts(
        "10.0.0.0/24",
        vec![record("gw", "10.0.0.1", "aa:bb:cc:dd:ee:01")],
    );

    assert_eq!(Outcome::Added, wiring.service.track("aa:bb:cc:dd:ee:02", "printer2"));

    let records = wiring.store.records();
    let added = records.iter().find(|r| r.name == "printer2").unwrap();
    assert_eq!("10.0.0.2", added.ip);
}

/// Config double that fails the test the moment the workflow reaches
/// for the range, proving the allocator was never consulted.
struct UnreachableConfig;

impl RangeConfig for UnreachableConfig {
    fn get(&self, _key: &str) -> Option<String> {
        panic!("allocator consulted for invalid input");
    }
}

#[test]
fn malformed_mac_fails_before_any_other_gate() {
    let store = MemoryHostStore::new();
    let notifier = RecordingNotifier::new();
    let service = RegistrationService::new(
        Box::new(StaticTokenContext::anonymous()),
        Box::new(store.clone()),
        Box::new(UnreachableConfig),
        Box::new(InventoryValidator::new(store.clone())),
        Box::new(notifier.clone()),
    );

    assert_eq!(Outcome::Fail, service.track("not-a-mac", "x"));
    assert!(store.records().is_empty());
    assert!(notifier.events().is_empty());
}

#[test]
fn exhausted_range_fails_without_writing() {
    let wiring = service_with_hosts(
        "10.0.0.252/30",
        vec![
            record("a", "10.0.0.253", "aa:bb:cc:dd:ee:01"),
            record("b", "10.0.0.254", "aa:bb:cc:dd:ee:02"),
        ],
    );

    assert_eq!(Outcome::Fail, wiring.service.track("aa:bb:cc:dd:ee:03", "c"));
    assert_eq!(2, wiring.store.records().len());
    assert!(wiring.notifier.events().is_empty());
}

#[test]
fn missing_range_configuration_fails() {
    let store = MemoryHostStore::new();
    let notifier = RecordingNotifier::new();
    let service = RegistrationService::new(
        Box::new(StaticTokenContext::anonymous()),
        Box::new(store.clone()),
        Box::new(StaticRangeConfig::empty()),
        Box::new(InventoryValidator::new(store.clone())),
        Box::new(notifier.clone()),
    );

    assert_eq!(Outcome::Fail, service.track("aa:bb:cc:dd:ee:01", "x"));
    assert!(store.records().is_empty());
}

#[test]
fn rejected_record_name_fails_validation() {
    let wiring = service("192.168.50.0/24");

    assert_eq!(Outcome::Fail, wiring.service.track("aa:bb:cc:dd:ee:01", "-bad name-"));
    assert!(wiring.store.records().is_empty());
    assert!(wiring.notifier.events().is_empty());
}

/// Store double whose write path always loses the uniqueness race.
struct ConflictingStore;

impl HostStore for ConflictingStore {
    fn find_by_mac(&self, _mac: &str) -> Result<Option<HostRecord>, StoreError> {
        Ok(None)
    }

    fn find_all(&self) -> Result<Vec<HostRecord>, StoreError> {
        Ok(Vec::new())
    }

    fn save(&self, record: &HostRecord) -> Result<(), StoreError> {
        Err(StoreError::Conflict(format!(
            "address {} already bound elsewhere",
            record.ip
        )))
    }
}

#[test]
fn late_uniqueness_conflict_maps_to_fail() {
    let store = MemoryHostStore::new();
    let notifier = RecordingNotifier::new();
    let service = RegistrationService::new(
        Box::new(StaticTokenContext::anonymous()),
        Box::new(ConflictingStore),
        Box::new(StaticRangeConfig::with_range("192.168.50.0/24")),
        Box::new(InventoryValidator::new(store)),
        Box::new(notifier.clone()),
    );

    assert_eq!(Outcome::Fail, service.track("aa:bb:cc:dd:ee:01", "x"));
    assert!(notifier.events().is_empty());
}

#[test]
fn store_rejects_duplicate_address_and_mac() {
    let store = MemoryHostStore::new();
    store
        .save(&record("a", "10.0.0.1", "aa:bb:cc:dd:ee:01"))
        .unwrap();

    let same_ip = record("b", "10.0.0.1", "aa:bb:cc:dd:ee:02");
    assert!(matches!(store.save(&same_ip), Err(StoreError::Conflict(_))));

    let same_mac = record("c", "10.0.0.2", "aa:bb:cc:dd:ee:01");
    assert!(matches!(store.save(&same_mac), Err(StoreError::Conflict(_))));

    assert_eq!(1, store.records().len());
}

#[test]
fn individualise_rewrites_the_bound_record_mac() {
    let bound = record("pc01", "192.168.50.7", "aa:bb:cc:dd:ee:07");
    let wiring = service_with_token("192.168.50.0/24", deploy_host("pc01", bound));

    assert_eq!(Outcome::Added, wiring.service.individualise("AA-BB-CC-DD-EE-10"));

    let records = wiring.store.records();
    assert_eq!(1, records.len());
    assert_eq!("aa:bb:cc:dd:ee:10", records[0].mac);
    assert_eq!("192.168.50.7", records[0].ip);
    assert_eq!(vec![ChangeEvent::HostsChanged], wiring.notifier.events());
}

#[test]
fn individualise_without_a_bound_host_fails() {
    let wiring = service("192.168.50.0/24");

    assert_eq!(Outcome::Fail, wiring.service.individualise("aa:bb:cc:dd:ee:10"));
    assert!(wiring.store.records().is_empty());
    assert!(wiring.notifier.events().is_empty());
}

#[test]
fn individualise_rejects_malformed_mac() {
    let bound = record("pc01", "192.168.50.7", "aa:bb:cc:dd:ee:07");
    let wiring = service_with_token("192.168.50.0/24", deploy_host("pc01", bound));

    assert_eq!(Outcome::Fail, wiring.service.individualise("not-a-mac"));
    assert_eq!("aa:bb:cc:dd:ee:07", wiring.store.records()[0].mac);
}

#[test]
fn accessors_read_the_token_bound_host() {
    let bound = record("pc01", "192.168.50.7", "aa:bb:cc:dd:ee:07")
        .with_inventory_number("INV-0042");
    let wiring = service_with_token("192.168.50.0/24", deploy_host("room12-pc01", bound));

    assert_eq!("room12-pc01", wiring.service.host_name());
    assert_eq!("INV-0042", wiring.service.inventory_number());
}

#[test]
fn accessors_return_empty_without_a_bound_host() {
    let wiring = service("192.168.50.0/24");

    assert_eq!("", wiring.service.host_name());
    assert_eq!("", wiring.service.inventory_number());
}

#[test]
fn accessors_tolerate_a_missing_inventory_tag() {
    let bound = record("pc02", "192.168.50.8", "aa:bb:cc:dd:ee:08");
    let wiring = service_with_token("192.168.50.0/24", deploy_host("pc02", bound));

    assert_eq!("", wiring.service.inventory_number());
}
