//! Ledger account address — the identity that submits artworks and casts
//! validation votes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

/// A ledger account address, always `0x`-prefixed hex (20 bytes, 40 nibbles).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Hex length including the prefix.
    const FULL_LEN: usize = 42;

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`FromStr`] for
    /// untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(is_well_formed(&s), "malformed account address: {s}");
        Self(s.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        is_well_formed(&self.0)
    }
}

fn is_well_formed(s: &str) -> bool {
    s.len() == AccountAddress::FULL_LEN
        && s.starts_with(AccountAddress::PREFIX)
        && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_well_formed(s) {
            Ok(Self(s.to_lowercase()))
        } else {
            Err(TypeError::InvalidAddress(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af";

    #[test]
    fn parses_well_formed_address() {
        let addr: AccountAddress = GOOD.parse().unwrap();
        assert_eq!(addr.as_str(), GOOD);
        assert!(addr.is_valid());
    }

    #[test]
    fn normalizes_case() {
        let upper = GOOD.to_uppercase().replace("0X", "0x");
        let addr: AccountAddress = upper.parse().unwrap();
        assert_eq!(addr.as_str(), GOOD);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(GOOD[2..].parse::<AccountAddress>().is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!("0xabc".parse::<AccountAddress>().is_err());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_garbage() {
        AccountAddress::new("not-an-address");
    }
}
