//! # RPC glue for the WLAN collector
//!
//! Thin dispatch from prefixed RPC method names onto the registration
//! workflow, plus in-memory collaborator implementations used by the
//! CLI and the integration tests. No transport lives here; the hosting
//! RPC layer hands us a method name and positional string parameters.

pub mod handler;
pub mod memory;
