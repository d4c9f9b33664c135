//! # WLAN collector core
//!
//! Self-registration of WLAN client devices into the host inventory.
//! A device authenticates with its deployment token and announces a
//! MAC address; the core canonicalizes it, decides between fail /
//! no-op / added, allocates the next free address from the configured
//! range and persists the new record.
//!
//! All interaction with the hosting system (storage, configuration,
//! validation, notification, token authentication) goes through the
//! contracts in [`ports`]; nothing in this crate touches a concrete
//! backend.

pub mod allocator;
pub mod error;
pub mod model;
pub mod ports;
pub mod registration;
