//! Core type definitions for Tierwise

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Hex account address (e.g. "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1")
///
/// Stored as entered. Identity comparisons ignore ASCII case, so a
/// checksummed and a lower-case spelling of one account are the same address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case spelling of the address
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive identity check
    pub fn same_as(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    /// Case-insensitive lexicographic ordering on the hex string
    pub fn cmp_ignore_case(&self, other: &Address) -> Ordering {
        let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

impl From<String> for Address {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

/// Predicate deciding whether an address may be admitted to a whitelist.
///
/// Checksum validation lives outside the tier engine; callers plug in
/// whatever check their chain tooling provides.
pub trait AddressValidator {
    fn is_valid(&self, address: &Address) -> bool;
}

impl<F> AddressValidator for F
where
    F: Fn(&Address) -> bool,
{
    fn is_valid(&self, address: &Address) -> bool {
        self(address)
    }
}

/// Format-only check: `0x` prefix followed by 20 hex-encoded bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressFormat;

impl AddressValidator for HexAddressFormat {
    fn is_valid(&self, address: &Address) -> bool {
        let Some(body) = address
            .as_str()
            .strip_prefix("0x")
            .or_else(|| address.as_str().strip_prefix("0X"))
        else {
            return false;
        };
        if body.len() != constants::ADDRESS_HEX_LEN {
            return false;
        }
        hex::decode(body).is_ok()
    }
}

/// Token amount in base units
pub type TokenAmount = u128;

/// Unix timestamp in milliseconds
pub type Timestamp = u64;

/// Constants
pub mod constants {
    use super::Timestamp;

    /// Hex characters in an address body (20 bytes)
    pub const ADDRESS_HEX_LEN: usize = 40;

    pub const MS_PER_MINUTE: Timestamp = 60 * 1000;

    pub const MS_PER_DAY: Timestamp = 24 * 60 * MS_PER_MINUTE;
}
