//! Domain values shared across the workflow and its collaborators.

/// A host inventory record.
///
/// Only the fields this subsystem reads or writes are modeled; the
/// hosting system may attach more. `name` is the record identity for
/// upserts, `ip` and `mac` carry the allocation result in string form
/// (`mac` always canonical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub name: String,
    pub ip: String,
    pub mac: String,
    pub inventory_number: Option<String>,
}

impl HostRecord {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            mac: String::new(),
            inventory_number: None,
        }
    }

    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = mac.into();
        self
    }

    pub fn with_inventory_number(mut self, tag: impl Into<String>) -> Self {
        self.inventory_number = Some(tag.into());
        self
    }
}

/// The device-to-host binding resolved from the deployment token of
/// the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployHost {
    pub identifier: String,
    pub record: HostRecord,
}

/// Kind-only change signal towards the hosting system. Carries no
/// payload; subscribers re-read the inventory themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    HostsChanged,
}
