//! # Registration workflow
//!
//! The decision state machine wrapping the allocator. Every entry
//! point runs as one synchronous unit of work per RPC request and
//! terminates in exactly one of three outcomes; no error ever crosses
//! the boundary. The calling device is low-trust, so failure detail
//! stays in the logs and the caller only learns the coarse tag.

use std::collections::HashSet;
use std::fmt;
use std::net::Ipv4Addr;

use tracing::{error, warn};

use wlancollect_common::network::mac;
use wlancollect_common::network::range::AddressRange;

use crate::allocator;
use crate::error::AllocateError;
use crate::model::{ChangeEvent, HostRecord};
use crate::ports::{ChangeNotifier, HostStore, RangeConfig, RecordValidator, TokenContext};

/// Configuration variable holding the CIDR range addresses are drawn
/// from.
pub const RANGE_VARIABLE: &str = "WlanCollectRange";

/// Terminal outcome of a registration call, rendered as a plain string
/// tag for the RPC caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    /// The announced MAC already has a record; repeated announcements
    /// are not errors and mutate nothing.
    NoOp,
    Fail,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Added => "added",
            Outcome::NoOp => "noop",
            Outcome::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrates device self-registration over the collaborator
/// contracts in [`crate::ports`].
pub struct RegistrationService {
    token: Box<dyn TokenContext>,
    store: Box<dyn HostStore>,
    config: Box<dyn RangeConfig>,
    validator: Box<dyn RecordValidator>,
    notifier: Box<dyn ChangeNotifier>,
}

impl RegistrationService {
    pub fn new(
        token: Box<dyn TokenContext>,
        store: Box<dyn HostStore>,
        config: Box<dyn RangeConfig>,
        validator: Box<dyn RecordValidator>,
        notifier: Box<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            token,
            store,
            config,
            validator,
            notifier,
        }
    }

    /// Registers the announced MAC address as a new inventory host.
    ///
    /// Gate order: canonicalize MAC, duplicate check (known MAC is a
    /// [`Outcome::NoOp`]), allocate an address, validate the candidate
    /// record, persist, notify. The first failing gate short-circuits
    /// to [`Outcome::Fail`]; malformed input never reaches the store's
    /// write path.
    pub fn track(&self, mac_address: &str, name: &str) -> Outcome {
        let mac = match mac::canonicalize(mac_address) {
            Ok(mac) => mac.to_string(),
            Err(_) => {
                error!(mac = mac_address, "invalid MAC address supplied by client");
                return Outcome::Fail;
            }
        };

        match self.store.find_by_mac(&mac) {
            Ok(Some(existing)) => {
                warn!(
                    mac = %mac,
                    host = %existing.name,
                    "MAC address already in use, not adding"
                );
                return Outcome::NoOp;
            }
            Ok(None) => {}
            Err(err) => {
                error!(mac = %mac, error = %err, "host lookup failed");
                return Outcome::Fail;
            }
        }

        let ip = match self.allocate() {
            Ok(ip) => ip,
            Err(err) => {
                error!(mac = %mac, error = %err, "could not allocate an address");
                return Outcome::Fail;
            }
        };

        let candidate = HostRecord::new(name, ip.to_string()).with_mac(mac);
        self.validate_and_save(candidate)
    }

    /// Overwrites the MAC address of the host bound to the current
    /// deployment token with the announced one.
    ///
    /// The no-op path of [`Self::track`] does not apply here; the
    /// target record is already resolved through the token.
    pub fn individualise(&self, mac_address: &str) -> Outcome {
        let mac = match mac::canonicalize(mac_address) {
            Ok(mac) => mac.to_string(),
            Err(_) => {
                error!(mac = mac_address, "invalid MAC address supplied by client");
                return Outcome::Fail;
            }
        };

        let Some(deploy) = self.token.host() else {
            // The authentication layer guarantees a bound host during
            // this call; reaching this branch is a logic error.
            error!(mac = %mac, "individualise called without a deploy host");
            return Outcome::Fail;
        };

        let mut record = deploy.record;
        record.mac = mac;
        self.validate_and_save(record)
    }

    /// Identifier of the token-bound host, or `""` when none is bound.
    /// Absent data, not an error.
    pub fn host_name(&self) -> String {
        if !self.token.has_host() {
            return String::new();
        }

        self.token
            .host()
            .map(|deploy| deploy.identifier)
            .unwrap_or_default()
    }

    /// Inventory tag of the token-bound host, or `""` when none is
    /// bound or the record carries no tag.
    pub fn inventory_number(&self) -> String {
        if !self.token.has_host() {
            return String::new();
        }

        self.token
            .host()
            .and_then(|deploy| deploy.record.inventory_number)
            .unwrap_or_default()
    }

    /// Reads the configured range and picks the next free address,
    /// treating every address currently bound to a record as taken.
    fn allocate(&self) -> Result<Ipv4Addr, AllocateError> {
        let raw = self
            .config
            .get(RANGE_VARIABLE)
            .ok_or(AllocateError::MissingConfig(RANGE_VARIABLE))?;
        let range: AddressRange = raw.parse()?;

        let in_use: HashSet<Ipv4Addr> = self
            .store
            .find_all()?
            .iter()
            .filter_map(|host| host.ip.parse().ok())
            .collect();

        Ok(allocator::next_free_address(&range, &in_use)?)
    }

    /// Gates 5 through 7: domain validation, persist, notify.
    fn validate_and_save(&self, record: HostRecord) -> Outcome {
        let violations = self.validator.validate(&record);
        if !violations.is_empty() {
            let joined = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            error!(
                host = %record.name,
                mac = %record.mac,
                violations = %joined,
                "host record rejected by validation"
            );
            return Outcome::Fail;
        }

        if let Err(err) = self.store.save(&record) {
            // A conflict here means another registration won the race
            // for this address or MAC between our reads and this write.
            error!(
                host = %record.name,
                mac = %record.mac,
                error = %err,
                "could not save host record"
            );
            return Outcome::Fail;
        }

        self.notifier.notify(ChangeEvent::HostsChanged);

        Outcome::Added
    }
}
