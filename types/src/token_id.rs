//! Token identifier: the key of one mintable series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one fungible series inside the collection.
///
/// Ids are chosen by the administrator at reservation time; there is no
/// allocation scheme and no relation between neighbouring ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u64);

impl TokenId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
