//! Account address type with `tsr_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejection returned when a raw string is not a well-formed address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address {0:?}: expected `tsr_` followed by at least one character")]
pub struct AddressError(pub String);

/// An account identity, always prefixed with `tsr_`.
///
/// Used for callers, mint recipients and the treasury that collects fees.
/// The core never interprets the suffix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for all Tessera addresses.
    pub const PREFIX: &'static str = "tsr_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`Address::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(address) => address,
            Err(e) => panic!("{e}"),
        }
    }

    /// Parse an address, rejecting strings without the `tsr_` prefix.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let s = raw.into();
        if s.starts_with(Self::PREFIX) && s.len() > Self::PREFIX.len() {
            Ok(Self(s))
        } else {
            Err(AddressError(s))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_strings() {
        let a = Address::parse("tsr_treasury").unwrap();
        assert_eq!(a.as_str(), "tsr_treasury");
        assert_eq!(a.to_string(), "tsr_treasury");
    }

    #[test]
    fn parse_rejects_missing_prefix_and_empty_suffix() {
        assert!(Address::parse("treasury").is_err());
        assert!(Address::parse("tsr_").is_err());
    }

    #[test]
    #[should_panic(expected = "invalid address")]
    fn new_panics_on_malformed_input() {
        let _ = Address::new("0xdeadbeef");
    }

    #[test]
    fn deserialize_validates_prefix() {
        let ok: Address = serde_json::from_str("\"tsr_alice\"").unwrap();
        assert_eq!(ok, Address::new("tsr_alice"));
        assert!(serde_json::from_str::<Address>("\"alice\"").is_err());
    }
}
