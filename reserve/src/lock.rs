//! Per-token lock flags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of lock categories a token carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockCategory {
    /// Engaged automatically at the hard cap. Terminal.
    Global,
    /// Administrative flag; recorded and reported, not consulted by admission.
    AdminRestricted,
    /// Blocks the public mint path only.
    UserRestricted,
}

impl LockCategory {
    pub const ALL: [LockCategory; 3] = [
        LockCategory::Global,
        LockCategory::AdminRestricted,
        LockCategory::UserRestricted,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Global => 0,
            Self::AdminRestricted => 1,
            Self::UserRestricted => 2,
        }
    }
}

impl fmt::Display for LockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Global => "global",
            Self::AdminRestricted => "admin_restricted",
            Self::UserRestricted => "user_restricted",
        };
        f.write_str(name)
    }
}

/// Lock flags embedded in a reserve record, one slot per [`LockCategory`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSet([bool; 3]);

impl LockSet {
    pub fn is_locked(&self, category: LockCategory) -> bool {
        self.0[category.index()]
    }

    /// Set a flag. Clearing `Global` once engaged is ignored.
    ///
    /// Returns whether the stored value changed.
    pub fn set(&mut self, category: LockCategory, value: bool) -> bool {
        if category == LockCategory::Global && self.is_locked(LockCategory::Global) && !value {
            return false;
        }
        let slot = &mut self.0[category.index()];
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Put `Global` back to a previous value when a mint is rolled back.
    pub(crate) fn rewind_global(&mut self, value: bool) {
        self.0[LockCategory::Global.index()] = value;
    }

    /// Categories currently engaged, in declaration order.
    pub fn engaged(&self) -> impl Iterator<Item = LockCategory> + '_ {
        LockCategory::ALL.into_iter().filter(|c| self.is_locked(*c))
    }
}
