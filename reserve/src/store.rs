//! Reserve store: sole owner of every reserve record and of the
//! reservation history.
//!
//! The store does not authorize and does not validate mint bounds. It is the
//! bookkeeping layer the admission guard reads and the mint engine commits to.

use std::collections::HashMap;

use crate::error::MintError;
use crate::lock::LockCategory;
use crate::record::ReserveRecord;
use tessera_types::TokenId;

#[derive(Debug, Default)]
pub struct ReserveStore {
    records: HashMap<TokenId, ReserveRecord>,
    /// Reserved ids in reservation order; the index is the sequence number.
    history: Vec<TokenId>,
}

impl ReserveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `id`. One-shot: a second reservation of the same id fails and
    /// leaves the first record untouched.
    pub fn reserve(
        &mut self,
        id: TokenId,
        max_supply: u128,
        metadata_ref: impl Into<String>,
        user_limit: u128,
        lock_users: bool,
    ) -> Result<&ReserveRecord, MintError> {
        if self.records.contains_key(&id) {
            return Err(MintError::AlreadyReserved(id));
        }
        let record = ReserveRecord::new(id, max_supply, metadata_ref.into(), user_limit, lock_users);
        self.history.push(id);
        let record: &ReserveRecord = self.records.entry(id).or_insert(record);
        Ok(record)
    }

    pub fn is_reserved(&self, id: TokenId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: TokenId) -> Option<&ReserveRecord> {
        self.records.get(&id)
    }

    // ── Lock registry ──────────────────────────────────────────────────

    /// Lock state of `id`. Unreserved ids read as unlocked.
    pub fn is_locked(&self, id: TokenId, category: LockCategory) -> bool {
        self.records
            .get(&id)
            .map(|r| r.is_locked(category))
            .unwrap_or(false)
    }

    /// Set a lock flag. Returns whether the stored value changed; unreserved
    /// ids and attempts to clear `Global` change nothing.
    pub fn set_lock(&mut self, id: TokenId, category: LockCategory, value: bool) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => record.locks.set(category, value),
            None => false,
        }
    }

    // ── Mutable fields ─────────────────────────────────────────────────

    /// Store a new user limit, raised to `minted_count` if lower.
    ///
    /// Returns the limit actually stored, or `None` for an unreserved id.
    pub fn set_user_limit(&mut self, id: TokenId, new_limit: u128) -> Option<u128> {
        let record = self.records.get_mut(&id)?;
        record.user_limit = new_limit.max(record.minted_count);
        Some(record.user_limit)
    }

    pub fn set_price(&mut self, id: TokenId, price: u128) -> Option<u128> {
        let record = self.records.get_mut(&id)?;
        record.unit_price = price;
        Some(price)
    }

    pub fn set_metadata_ref(&mut self, id: TokenId, metadata_ref: impl Into<String>) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.metadata_ref = metadata_ref.into();
                true
            }
            None => false,
        }
    }

    /// Commit a mint: add `amount` to the counter and engage `Global` when the
    /// hard cap is hit exactly.
    ///
    /// Bounds are the admission guard's job and are not re-checked here.
    pub fn record_mint(&mut self, id: TokenId, amount: u128) -> Option<&ReserveRecord> {
        let record = self.records.get_mut(&id)?;
        debug_assert!(amount <= record.remaining(), "record_mint past the hard cap");
        record.minted_count = record.minted_count.saturating_add(amount);
        if record.minted_count == record.max_supply {
            record.locks.set(LockCategory::Global, true);
        }
        Some(&*record)
    }

    /// Rewind the mint-owned fields of a record (counter and `Global`) to a
    /// snapshot taken earlier in the same mint call.
    ///
    /// Only used to compensate a mint whose later step failed; it is the one
    /// path allowed to lower `minted_count` or clear `Global`. Administrative
    /// edits made in the meantime are kept.
    pub(crate) fn restore(&mut self, snapshot: &ReserveRecord) {
        if let Some(record) = self.records.get_mut(&snapshot.id) {
            record.minted_count = snapshot.minted_count;
            record
                .locks
                .rewind_global(snapshot.is_locked(LockCategory::Global));
        }
    }

    // ── Read accessors ─────────────────────────────────────────────────

    pub fn max_supply(&self, id: TokenId) -> Option<u128> {
        self.records.get(&id).map(|r| r.max_supply)
    }

    pub fn user_limit(&self, id: TokenId) -> Option<u128> {
        self.records.get(&id).map(|r| r.user_limit)
    }

    pub fn minted_count(&self, id: TokenId) -> Option<u128> {
        self.records.get(&id).map(|r| r.minted_count)
    }

    pub fn price(&self, id: TokenId) -> Option<u128> {
        self.records.get(&id).map(|r| r.unit_price)
    }

    pub fn metadata_ref(&self, id: TokenId) -> Option<&str> {
        self.records.get(&id).map(|r| r.metadata_ref.as_str())
    }

    /// Reserved ids in reservation order.
    pub fn history(&self) -> &[TokenId] {
        &self.history
    }

    pub fn reserved_count(&self) -> usize {
        self.history.len()
    }

    /// The id reserved with sequence number `seq` (0-based).
    pub fn reserved_at(&self, seq: usize) -> Option<TokenId> {
        self.history.get(seq).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TokenId {
        TokenId::new(n)
    }

    fn store_with(n: u64, max: u128, limit: u128) -> ReserveStore {
        let mut store = ReserveStore::new();
        store.reserve(id(n), max, "meta.json", limit, false).unwrap();
        store
    }

    #[test]
    fn reserve_initializes_record() {
        let mut store = ReserveStore::new();
        let record = store.reserve(id(1), 100, "one.json", 10, true).unwrap();
        assert_eq!(record.max_supply, 100);
        assert_eq!(record.user_limit, 10);
        assert_eq!(record.minted_count, 0);
        assert_eq!(record.unit_price, 0);
        assert_eq!(record.metadata_ref, "one.json");
        assert!(record.is_locked(LockCategory::UserRestricted));
        assert!(!record.is_locked(LockCategory::Global));
        assert!(store.is_reserved(id(1)));
    }

    #[test]
    fn double_reservation_is_rejected_and_keeps_first_record() {
        let mut store = store_with(1, 100, 10);
        let err = store.reserve(id(1), 5, "other.json", 5, true).unwrap_err();
        assert_eq!(err, MintError::AlreadyReserved(id(1)));
        let record = store.get(id(1)).unwrap();
        assert_eq!(record.max_supply, 100);
        assert_eq!(record.metadata_ref, "meta.json");
        assert!(!record.is_locked(LockCategory::UserRestricted));
        assert_eq!(store.history(), &[id(1)]);
    }

    #[test]
    fn history_is_insertion_ordered() {
        let mut store = ReserveStore::new();
        for n in [9, 2, 5] {
            store.reserve(id(n), 1, "", 1, false).unwrap();
        }
        assert_eq!(store.history(), &[id(9), id(2), id(5)]);
        assert_eq!(store.reserved_count(), 3);
        assert_eq!(store.reserved_at(1), Some(id(2)));
        assert_eq!(store.reserved_at(3), None);
    }

    #[test]
    fn missing_token_reads_unlocked() {
        let store = ReserveStore::new();
        for category in LockCategory::ALL {
            assert!(!store.is_locked(id(42), category));
        }
    }

    #[test]
    fn set_lock_on_missing_token_is_noop() {
        let mut store = ReserveStore::new();
        assert!(!store.set_lock(id(42), LockCategory::UserRestricted, true));
        assert!(!store.is_reserved(id(42)));
    }

    #[test]
    fn user_limit_is_clamped_to_minted_count() {
        let mut store = store_with(1, 100, 50);
        store.record_mint(id(1), 20);
        assert_eq!(store.set_user_limit(id(1), 5), Some(20));
        assert_eq!(store.user_limit(id(1)), Some(20));
        assert_eq!(store.set_user_limit(id(1), 70), Some(70));
    }

    #[test]
    fn set_user_limit_on_missing_token_returns_none() {
        let mut store = ReserveStore::new();
        assert_eq!(store.set_user_limit(id(3), 10), None);
    }

    #[test]
    fn record_mint_engages_global_at_cap() {
        let mut store = store_with(1, 10, 10);
        store.record_mint(id(1), 9);
        assert!(!store.is_locked(id(1), LockCategory::Global));
        let record = store.record_mint(id(1), 1).unwrap();
        assert_eq!(record.minted_count, 10);
        assert!(record.is_locked(LockCategory::Global));
        assert!(record.is_sold_out());
    }

    #[test]
    fn restore_rewinds_counter_and_global_lock() {
        let mut store = store_with(1, 10, 10);
        let snapshot = store.get(id(1)).cloned().unwrap();
        store.record_mint(id(1), 10);
        store.set_price(id(1), 9);
        assert!(store.is_locked(id(1), LockCategory::Global));
        store.restore(&snapshot);
        assert_eq!(store.minted_count(id(1)), Some(0));
        assert!(!store.is_locked(id(1), LockCategory::Global));
        assert_eq!(store.price(id(1)), Some(9));
    }

    #[test]
    fn price_and_metadata_overwrite() {
        let mut store = store_with(1, 10, 10);
        assert_eq!(store.set_price(id(1), 7), Some(7));
        assert!(store.set_metadata_ref(id(1), "new.json"));
        assert_eq!(store.price(id(1)), Some(7));
        assert_eq!(store.metadata_ref(id(1)), Some("new.json"));
        assert!(!store.set_metadata_ref(id(2), "x"));
    }
}
