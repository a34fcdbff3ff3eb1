//! Permission roles queried on the authorization oracle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A permission role.
///
/// Membership lives outside the core; the core only asks whether a caller
/// holds a role before an administrative or minting operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Reserves token ids and tunes limits, prices and locks.
    DefaultAdmin,
    /// Mints on the administrative path.
    Minter,
    /// Burns issued units.
    Burner,
    /// Toggles the pause flag. The core never checks it; the flag owner does.
    Pauser,
    /// Edits metadata references and the base URI.
    UriSetter,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::DefaultAdmin,
        Role::Minter,
        Role::Burner,
        Role::Pauser,
        Role::UriSetter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultAdmin => "default_admin",
            Self::Minter => "minter",
            Self::Burner => "burner",
            Self::Pauser => "pauser",
            Self::UriSetter => "uri_setter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
