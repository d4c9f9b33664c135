//! # Collaborator contracts (driven side)
//!
//! This module defines the contracts (traits) for everything the
//! workflow needs from the hosting system: token authentication,
//! durable host storage, configuration, record validation and change
//! notification.
//!
//! ## Rules
//! 1. All items here are `traits` or the values they exchange.
//! 2. No concrete implementations allowed.
//! 3. The workflow depends only on these contracts, never on an ORM,
//!    a config store or an event bus directly.

use std::fmt;

use crate::error::StoreError;
use crate::model::{ChangeEvent, DeployHost, HostRecord};

/// Resolved authentication state of the current deployment-token
/// request.
pub trait TokenContext: Send + Sync {
    fn has_host(&self) -> bool;

    /// The host binding of the authenticated device, if any.
    fn host(&self) -> Option<DeployHost>;
}

/// Durable host inventory access.
///
/// `save` is the serialization point for concurrent registrations:
/// the backend must enforce uniqueness of `mac` and `ip` across
/// records and reject a violating write with [`StoreError::Conflict`].
/// The workflow's earlier duplicate check and allocation are
/// point-in-time reads and can race; this constraint is what keeps two
/// simultaneous registrations from sharing one address.
pub trait HostStore: Send + Sync {
    fn find_by_mac(&self, mac: &str) -> Result<Option<HostRecord>, StoreError>;

    fn find_all(&self) -> Result<Vec<HostRecord>, StoreError>;

    fn save(&self, record: &HostRecord) -> Result<(), StoreError>;
}

/// Read access to the hosting system's configuration store.
pub trait RangeConfig: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// A single field-level rule violation reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain validation of a candidate record before it is persisted.
/// An empty result means the record is acceptable.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &HostRecord) -> Vec<Violation>;
}

/// Fire-and-forget change signal towards the hosting system. Delivery
/// failures are the notifier's problem; the workflow never sees them.
pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, event: ChangeEvent);
}
