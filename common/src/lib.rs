//! Shared value types for the WLAN collector: canonical MAC address
//! handling and the configured CIDR address range.

pub mod network;
