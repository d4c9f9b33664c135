//! Failure taxonomy of the registration core.
//!
//! None of these ever cross the RPC boundary; the workflow collapses
//! them to the `"fail"` outcome and keeps the detail in the logs.

use thiserror::Error;

use wlancollect_common::network::range::RangeError;

/// Address allocation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The scan left the configured range without finding a candidate.
    #[error("no address available")]
    Exhausted,
}

/// Errors surfaced by the host storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Under concurrent
    /// registrations this is the losing side of the race.
    #[error("conflicting record: {0}")]
    Conflict(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Everything that can keep the workflow from producing an address.
#[derive(Debug, Error)]
pub enum AllocateError {
    #[error("range configuration variable {0:?} is not set")]
    MissingConfig(&'static str),
    #[error("configured range is invalid: {0}")]
    BadRange(#[from] RangeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
