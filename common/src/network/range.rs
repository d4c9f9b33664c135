//! The configured CIDR block addresses are drawn from.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("malformed address range: {0:?}")]
    Malformed(String),
    /// Allocation excludes the block endpoints, so anything narrower
    /// than a /30 leaves nothing to hand out.
    #[error("address range /{0} is too narrow to allocate from")]
    TooNarrow(u8),
}

/// A contiguous IPv4 block in CIDR notation (`base/prefix`).
///
/// Immutable value type; supplied by configuration per allocation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    network: Ipv4Network,
}

impl AddressRange {
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, RangeError> {
        let network = Ipv4Network::new(addr, prefix)
            .map_err(|_| RangeError::Malformed(format!("{addr}/{prefix}")))?;

        if prefix > 30 {
            return Err(RangeError::TooNarrow(prefix));
        }

        Ok(Self { network })
    }

    /// The network address of the block (host-part bits zero).
    pub fn network(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.network.contains(addr)
    }
}

impl FromStr for AddressRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| RangeError::Malformed(s.to_string()))?;

        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| RangeError::Malformed(s.to_string()))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| RangeError::Malformed(s.to_string()))?;

        Self::new(addr, prefix)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix())
    }
}
