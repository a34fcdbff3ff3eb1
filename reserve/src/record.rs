//! The per-token reserve record.

use crate::lock::{LockCategory, LockSet};
use serde::{Deserialize, Serialize};
use tessera_types::TokenId;

/// Supply and pricing metadata of one reserved token id.
///
/// A record exists only once its id has been reserved, so "reserved" is the
/// record's presence in the [`ReserveStore`](crate::ReserveStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveRecord {
    pub id: TokenId,

    /// Suffix appended to the collection base URI.
    pub metadata_ref: String,

    /// Hard cap on units ever issued. Fixed at reservation.
    pub max_supply: u128,

    /// Units issued so far. Never decreases, burns included.
    pub minted_count: u128,

    /// Ceiling for the public mint path. Never below `minted_count`.
    pub user_limit: u128,

    /// Fee per unit on the public mint path.
    pub unit_price: u128,

    pub locks: LockSet,
}

impl ReserveRecord {
    pub(crate) fn new(
        id: TokenId,
        max_supply: u128,
        metadata_ref: String,
        user_limit: u128,
        lock_users: bool,
    ) -> Self {
        let mut locks = LockSet::default();
        locks.set(LockCategory::UserRestricted, lock_users);
        Self {
            id,
            metadata_ref,
            max_supply,
            minted_count: 0,
            user_limit,
            unit_price: 0,
            locks,
        }
    }

    pub fn is_locked(&self, category: LockCategory) -> bool {
        self.locks.is_locked(category)
    }

    /// Units still mintable before the hard cap.
    pub fn remaining(&self) -> u128 {
        self.max_supply.saturating_sub(self.minted_count)
    }

    /// Whether the hard cap has been reached.
    pub fn is_sold_out(&self) -> bool {
        self.minted_count >= self.max_supply
    }
}
