//! # Next-free-address selection
//!
//! Picks one unassigned address out of the configured range. Pure
//! logic: the caller supplies the range and the set of addresses
//! already bound to host records, and re-checks uniqueness when the
//! record is persisted (see the [`HostStore`] contract).
//!
//! [`HostStore`]: crate::ports::HostStore

use std::collections::HashSet;
use std::net::Ipv4Addr;

use wlancollect_common::network::range::AddressRange;

use crate::error::AllocationError;

/// Computes the next unassigned address in `range`.
///
/// The scan starts at the range's network address and advances through
/// the 32-bit address space in ascending order, so for a fixed input
/// the result is always the numerically smallest eligible address.
/// Candidates whose final octet is 0 or 255 are skipped wherever the
/// scan crosses an octet boundary, not only at the range's own
/// endpoints: legacy client firmware treats them as network or
/// broadcast addresses regardless of the actual prefix.
///
/// Fails with [`AllocationError::Exhausted`] once the scan leaves the
/// range without a hit.
pub fn next_free_address(
    range: &AddressRange,
    in_use: &HashSet<Ipv4Addr>,
) -> Result<Ipv4Addr, AllocationError> {
    let mut cursor = u32::from(range.network());

    loop {
        cursor = step(cursor).ok_or(AllocationError::Exhausted)?;
        let candidate = Ipv4Addr::from(cursor);

        if !range.contains(candidate) {
            return Err(AllocationError::Exhausted);
        }
        if !in_use.contains(&candidate) {
            return Ok(candidate);
        }
    }
}

/// Advances past `addr` to the next value whose final octet is neither
/// 0 nor 255. `None` once the address space is exhausted.
fn step(addr: u32) -> Option<u32> {
    let mut next = addr;
    loop {
        next = next.checked_add(1)?;
        match next & 0xff {
            0 | 255 => continue,
            _ => return Some(next),
        }
    }
}
