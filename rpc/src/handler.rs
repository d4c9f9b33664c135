//! Prefixed method dispatch over the registration workflow.

use tracing::error;

use wlancollect_core::registration::{Outcome, RegistrationService};

/// Deployment variants of the collector endpoint. Both wrap the same
/// workflow; they differ in method-name prefix and in which calls are
/// published to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Legacy deployment: publishes `track` only.
    CollectWlanIps,
    /// Current deployment: `track`, `individualise` and the host
    /// accessors.
    CollectWlanMac,
}

impl Variant {
    pub fn prefix(&self) -> &'static str {
        match self {
            Variant::CollectWlanIps => "collect_wlan_ips_",
            Variant::CollectWlanMac => "collect_wlan_mac_",
        }
    }
}

/// Maps inbound RPC calls onto [`RegistrationService`].
///
/// The boundary is total: every published method returns a plain
/// string (an outcome tag or an accessor value), never an error.
/// Methods outside the variant's surface return `None` so the hosting
/// RPC layer can report them as unpublished.
pub struct RpcHandler {
    variant: Variant,
    service: RegistrationService,
}

impl RpcHandler {
    pub fn new(variant: Variant, service: RegistrationService) -> Self {
        Self { variant, service }
    }

    pub fn dispatch(&self, method: &str, params: &[&str]) -> Option<String> {
        let operation = method.strip_prefix(self.variant.prefix())?;

        match (self.variant, operation) {
            (_, "track") => Some(self.track(params)),
            (Variant::CollectWlanMac, "individualise") => Some(self.individualise(params)),
            (Variant::CollectWlanMac, "hostName") => Some(self.service.host_name()),
            (Variant::CollectWlanMac, "inventoryNumber") => Some(self.service.inventory_number()),
            _ => None,
        }
    }

    fn track(&self, params: &[&str]) -> String {
        match params {
            [mac, name] => self.service.track(mac, name).to_string(),
            _ => {
                error!(expected = 2, got = params.len(), "track: wrong parameter count");
                Outcome::Fail.to_string()
            }
        }
    }

    fn individualise(&self, params: &[&str]) -> String {
        match params {
            [mac] => self.service.individualise(mac).to_string(),
            _ => {
                error!(
                    expected = 1,
                    got = params.len(),
                    "individualise: wrong parameter count"
                );
                Outcome::Fail.to_string()
            }
        }
    }
}
