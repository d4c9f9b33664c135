//! In-memory collaborator implementations.
//!
//! Stand-ins for the hosting system's storage, configuration,
//! validation, notification and token backends; used by the CLI and
//! the integration tests. [`MemoryHostStore::save`] enforces the same
//! MAC/address uniqueness constraint a production backend must
//! provide, so the workflow's serialization point behaves the same
//! here as against real storage.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use tracing::debug;

use wlancollect_common::network::mac;
use wlancollect_core::error::StoreError;
use wlancollect_core::model::{ChangeEvent, DeployHost, HostRecord};
use wlancollect_core::ports::{
    ChangeNotifier, HostStore, RangeConfig, RecordValidator, TokenContext, Violation,
};
use wlancollect_core::registration::RANGE_VARIABLE;

/// Shared in-memory host inventory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryHostStore {
    records: Arc<Mutex<Vec<HostRecord>>>,
}

impl MemoryHostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: Vec<HostRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Snapshot of the current inventory.
    pub fn records(&self) -> Vec<HostRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl HostStore for MemoryHostStore {
    fn find_by_mac(&self, mac: &str) -> Result<Option<HostRecord>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|record| record.mac == mac).cloned())
    }

    fn find_all(&self) -> Result<Vec<HostRecord>, StoreError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn save(&self, record: &HostRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();

        // Uniqueness constraint on mac and ip, checked against every
        // record except the one being upserted.
        for other in records.iter().filter(|other| other.name != record.name) {
            if !record.mac.is_empty() && other.mac == record.mac {
                return Err(StoreError::Conflict(format!(
                    "MAC address {} already bound to {}",
                    record.mac, other.name
                )));
            }
            if other.ip == record.ip {
                return Err(StoreError::Conflict(format!(
                    "address {} already bound to {}",
                    record.ip, other.name
                )));
            }
        }

        match records.iter_mut().find(|other| other.name == record.name) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        Ok(())
    }
}

/// Configuration map seeded with the range variable.
#[derive(Debug, Clone, Default)]
pub struct StaticRangeConfig {
    values: HashMap<String, String>,
}

impl StaticRangeConfig {
    pub fn with_range(range: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(RANGE_VARIABLE.to_string(), range.to_string());
        Self { values }
    }

    /// No range configured at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl RangeConfig for StaticRangeConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Fixed token resolution: either anonymous or bound to one host.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenContext {
    host: Option<DeployHost>,
}

impl StaticTokenContext {
    /// A token that resolves to no host binding.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bound(host: DeployHost) -> Self {
        Self { host: Some(host) }
    }
}

impl TokenContext for StaticTokenContext {
    fn has_host(&self) -> bool {
        self.host.is_some()
    }

    fn host(&self) -> Option<DeployHost> {
        self.host.clone()
    }
}

/// The field-level checks a production record validator runs: name
/// well-formedness, address shape, canonical MAC, and MAC/address
/// uniqueness against the rest of the inventory.
#[derive(Debug, Clone)]
pub struct InventoryValidator {
    store: MemoryHostStore,
}

impl InventoryValidator {
    pub fn new(store: MemoryHostStore) -> Self {
        Self { store }
    }
}

impl RecordValidator for InventoryValidator {
    fn validate(&self, record: &HostRecord) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !is_hostname_label(&record.name) {
            violations.push(Violation::new(
                "name",
                "must be a non-empty hostname label",
            ));
        }

        if record.ip.parse::<Ipv4Addr>().is_err() {
            violations.push(Violation::new("ip", "not a valid IPv4 address"));
        }

        match mac::canonicalize(&record.mac) {
            Ok(parsed) if parsed.to_string() == record.mac => {}
            _ => violations.push(Violation::new("mac", "not a canonical MAC address")),
        }

        for other in self.store.records() {
            if other.name == record.name {
                continue;
            }
            if other.mac == record.mac {
                violations.push(Violation::new("mac", "already assigned to another host"));
            }
            if other.ip == record.ip {
                violations.push(Violation::new("ip", "already assigned to another host"));
            }
        }

        violations
    }
}

fn is_hostname_label(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Records every event for later assertions. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn notify(&self, event: ChangeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Logs the event and drops it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ChangeNotifier for LogNotifier {
    fn notify(&self, event: ChangeEvent) {
        debug!(?event, "change notification");
    }
}
