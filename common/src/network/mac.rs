//! # Canonical MAC address handling
//!
//! Client devices announce their hardware address in whatever shape
//! their firmware produces: `AA:BB:CC:DD:EE:FF`, `aa-bb-cc-dd-ee-ff`,
//! `aabb.ccdd.eeff` or a bare 12-digit hex string. Everything is
//! normalized to one canonical form before comparison or storage:
//! lowercase, colon-separated hex, which is exactly what
//! [`MacAddr`]'s `Display` renders.

use pnet::util::MacAddr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MacParseError {
    #[error("invalid MAC address: {0:?}")]
    Invalid(String),
}

/// Parses a client-supplied hardware address into canonical form.
///
/// Separators (`:`, `-`, `.`) and surrounding whitespace are ignored;
/// the remaining characters must be exactly 12 hex digits.
pub fn canonicalize(input: &str) -> Result<MacAddr, MacParseError> {
    let digits: Vec<char> = input
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.') && !c.is_whitespace())
        .collect();

    if digits.len() != 12 || !digits.iter().all(|c| c.is_ascii_hexdigit()) {
        return Err(MacParseError::Invalid(input.to_string()));
    }

    let mut octets = [0u8; 6];
    for (i, octet) in octets.iter_mut().enumerate() {
        let pair: String = digits[i * 2..i * 2 + 2].iter().collect();
        *octet = u8::from_str_radix(&pair, 16)
            .map_err(|_| MacParseError::Invalid(input.to_string()))?;
    }

    Ok(MacAddr::new(
        octets[0], octets[1], octets[2], octets[3], octets[4], octets[5],
    ))
}
