//! Admission guard: the ordered precondition checks run before any mint
//! touches a balance.
//!
//! Both pipelines short-circuit on the first failing check, so the error a
//! caller sees is always the earliest violated precondition. The final step
//! of each pipeline engages the entry latch; the returned [`Admission`] holds
//! it until the mint completes or fails.
//!
//! Administrative edits do not take the latch, so the record-level bounds are
//! checked a second time by [`Admission::recheck`] under the store write lock,
//! immediately before the counter moves.

use tessera_store::AuthorizationOracle;
use tessera_types::{Address, Role, TokenId};

use crate::error::MintError;
use crate::latch::{EntryLatch, LatchGuard};
use crate::lock::LockCategory;
use crate::record::ReserveRecord;
use crate::store::ReserveStore;

/// Which pipeline admitted a mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintPath {
    Admin,
    Public,
}

/// A mint request that passed admission.
#[derive(Debug)]
pub struct Admission<'l> {
    pub path: MintPath,
    /// The record as it was when admitted; the rollback target.
    pub snapshot: ReserveRecord,
    pub amount: u128,
    /// Fee owed on the public path (zero on the admin path).
    pub required_payment: u128,
    latch: LatchGuard<'l>,
}

impl<'l> Admission<'l> {
    /// Give up the admission, releasing the entry latch.
    pub fn release(self) {
        drop(self.latch);
    }

    /// Check the admitted amount against `current`, the record as it stands
    /// at commit. Price is not re-checked: the payment was taken against the
    /// admitted price.
    pub fn recheck(&self, current: &ReserveRecord) -> Result<(), MintError> {
        not_globally_locked(current)?;
        if self.path == MintPath::Public {
            not_user_locked(current)?;
            within_user_limit(current, self.amount)?;
        }
        within_max_supply(current, self.amount)
    }
}

/// Admin mint path: reserved, not globally locked, within the hard cap,
/// caller is a minter, no mint in flight.
pub fn admit_admin<'l>(
    store: &ReserveStore,
    authority: &dyn AuthorizationOracle,
    latch: &'l EntryLatch,
    caller: &Address,
    id: TokenId,
    amount: u128,
) -> Result<Admission<'l>, MintError> {
    let record = reserved(store, id)?;
    not_globally_locked(record)?;
    within_max_supply(record, amount)?;
    require_role(authority, caller, Role::Minter)?;
    let latch = latch.enter()?;
    Ok(Admission {
        path: MintPath::Admin,
        snapshot: record.clone(),
        amount,
        required_payment: 0,
        latch,
    })
}

/// Public mint path: reserved, not globally locked, not user locked, within
/// the user limit (and the hard cap), paid for, no mint in flight.
pub fn admit_public<'l>(
    store: &ReserveStore,
    latch: &'l EntryLatch,
    id: TokenId,
    amount: u128,
    payment: u128,
) -> Result<Admission<'l>, MintError> {
    let record = reserved(store, id)?;
    not_globally_locked(record)?;
    not_user_locked(record)?;
    within_user_limit(record, amount)?;
    within_max_supply(record, amount)?;
    let required_payment = payment_covers(record, amount, payment)?;
    let latch = latch.enter()?;
    Ok(Admission {
        path: MintPath::Public,
        snapshot: record.clone(),
        amount,
        required_payment,
        latch,
    })
}

// ── Individual checks ──────────────────────────────────────────────────

fn reserved(store: &ReserveStore, id: TokenId) -> Result<&ReserveRecord, MintError> {
    store.get(id).ok_or(MintError::NotReserved(id))
}

fn not_globally_locked(record: &ReserveRecord) -> Result<(), MintError> {
    if record.is_locked(LockCategory::Global) {
        return Err(MintError::GloballyLocked(record.id));
    }
    Ok(())
}

fn not_user_locked(record: &ReserveRecord) -> Result<(), MintError> {
    if record.is_locked(LockCategory::UserRestricted) {
        return Err(MintError::UserLocked(record.id));
    }
    Ok(())
}

/// Zero-amount requests count as out of bounds.
fn within_max_supply(record: &ReserveRecord, amount: u128) -> Result<(), MintError> {
    if amount == 0 || amount > record.remaining() {
        return Err(MintError::ExceedsMax {
            token: record.id,
            requested: amount,
            minted: record.minted_count,
            max: record.max_supply,
        });
    }
    Ok(())
}

/// Zero-amount requests count as out of bounds.
fn within_user_limit(record: &ReserveRecord, amount: u128) -> Result<(), MintError> {
    let headroom = record.user_limit.saturating_sub(record.minted_count);
    if amount == 0 || amount > headroom {
        return Err(MintError::ExceedsUserLimit {
            token: record.id,
            requested: amount,
            minted: record.minted_count,
            limit: record.user_limit,
        });
    }
    Ok(())
}

/// Returns the fee owed. Overpayment passes; an overflowing fee saturates
/// and can never be covered.
fn payment_covers(record: &ReserveRecord, amount: u128, payment: u128) -> Result<u128, MintError> {
    let required = record.unit_price.saturating_mul(amount);
    if payment < required {
        return Err(MintError::InsufficientPayment {
            token: record.id,
            required,
            supplied: payment,
        });
    }
    Ok(required)
}

pub(crate) fn require_role(
    authority: &dyn AuthorizationOracle,
    caller: &Address,
    role: Role,
) -> Result<(), MintError> {
    if !authority.has_role(caller, role) {
        return Err(MintError::Unauthorized {
            caller: caller.clone(),
            role,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Roles(HashSet<(Address, Role)>);

    impl AuthorizationOracle for Roles {
        fn has_role(&self, caller: &Address, role: Role) -> bool {
            self.0.contains(&(caller.clone(), role))
        }
    }

    fn minter() -> Address {
        Address::new("tsr_minter")
    }

    fn roles() -> Roles {
        Roles([(minter(), Role::Minter)].into_iter().collect())
    }

    fn store() -> ReserveStore {
        let mut store = ReserveStore::new();
        store.reserve(TokenId::new(1), 10, "", 4, false).unwrap();
        store.set_price(TokenId::new(1), 3);
        store
    }

    const ID: TokenId = TokenId::new(1);

    #[test]
    fn admin_checks_run_in_order() {
        let store = store();
        let latch = EntryLatch::new();
        let stranger = Address::new("tsr_stranger");

        // Unreserved beats every other failure.
        let err = admit_admin(&store, &roles(), &latch, &stranger, TokenId::new(9), 0).unwrap_err();
        assert_eq!(err, MintError::NotReserved(TokenId::new(9)));

        // Cap is checked before the role.
        let err = admit_admin(&store, &roles(), &latch, &stranger, ID, 11).unwrap_err();
        assert!(matches!(err, MintError::ExceedsMax { requested: 11, .. }));

        let err = admit_admin(&store, &roles(), &latch, &stranger, ID, 1).unwrap_err();
        assert!(matches!(err, MintError::Unauthorized { role: Role::Minter, .. }));

        let _held = latch.enter().unwrap();
        let err = admit_admin(&store, &roles(), &latch, &minter(), ID, 1).unwrap_err();
        assert_eq!(err, MintError::ReentrantCall);
    }

    #[test]
    fn admin_cap_is_inclusive() {
        let store = store();
        let latch = EntryLatch::new();
        let admission = admit_admin(&store, &roles(), &latch, &minter(), ID, 10).unwrap();
        assert_eq!(admission.amount, 10);
        assert_eq!(admission.required_payment, 0);
        assert!(latch.is_engaged());
        admission.release();
        assert!(!latch.is_engaged());
    }

    #[test]
    fn zero_amount_is_out_of_bounds() {
        let store = store();
        let latch = EntryLatch::new();
        let err = admit_admin(&store, &roles(), &latch, &minter(), ID, 0).unwrap_err();
        assert!(matches!(err, MintError::ExceedsMax { requested: 0, .. }));
        let err = admit_public(&store, &latch, ID, 0, 100).unwrap_err();
        assert!(matches!(err, MintError::ExceedsUserLimit { requested: 0, .. }));
        assert!(!latch.is_engaged());
    }

    #[test]
    fn public_path_uses_user_limit_not_max() {
        let store = store();
        let latch = EntryLatch::new();
        let err = admit_public(&store, &latch, ID, 5, 15).unwrap_err();
        assert!(matches!(err, MintError::ExceedsUserLimit { limit: 4, .. }));
        assert!(admit_public(&store, &latch, ID, 4, 12).is_ok());
    }

    #[test]
    fn public_path_still_respects_hard_cap() {
        let mut store = store();
        store.set_user_limit(ID, 50);
        let latch = EntryLatch::new();
        let err = admit_public(&store, &latch, ID, 11, 33).unwrap_err();
        assert!(matches!(err, MintError::ExceedsMax { max: 10, .. }));
    }

    #[test]
    fn payment_must_cover_price() {
        let store = store();
        let latch = EntryLatch::new();
        let err = admit_public(&store, &latch, ID, 2, 5).unwrap_err();
        assert_eq!(
            err,
            MintError::InsufficientPayment { token: ID, required: 6, supplied: 5 }
        );
        let admission = admit_public(&store, &latch, ID, 2, 50).unwrap();
        assert_eq!(admission.required_payment, 6);
    }

    #[test]
    fn overflowing_fee_is_never_covered() {
        let mut store = store();
        store.set_price(ID, u128::MAX);
        let latch = EntryLatch::new();
        let err = admit_public(&store, &latch, ID, 2, u128::MAX - 1).unwrap_err();
        assert!(matches!(err, MintError::InsufficientPayment { required: u128::MAX, .. }));
    }

    #[test]
    fn recheck_sees_edits_made_after_admission() {
        let mut store = store();
        let latch = EntryLatch::new();
        let admission = admit_public(&store, &latch, ID, 3, 9).unwrap();
        assert_eq!(admission.path, MintPath::Public);
        assert!(admission.recheck(store.get(ID).unwrap()).is_ok());

        store.set_user_limit(ID, 2);
        let err = admission.recheck(store.get(ID).unwrap()).unwrap_err();
        assert!(matches!(err, MintError::ExceedsUserLimit { requested: 3, limit: 2, .. }));

        store.set_user_limit(ID, 4);
        store.set_lock(ID, LockCategory::UserRestricted, true);
        assert_eq!(
            admission.recheck(store.get(ID).unwrap()).unwrap_err(),
            MintError::UserLocked(ID)
        );
    }

    #[test]
    fn admin_recheck_ignores_public_bounds() {
        let mut store = store();
        let latch = EntryLatch::new();
        let admission = admit_admin(&store, &roles(), &latch, &minter(), ID, 6).unwrap();
        store.set_lock(ID, LockCategory::UserRestricted, true);
        assert!(admission.recheck(store.get(ID).unwrap()).is_ok());

        store.record_mint(ID, 5);
        let err = admission.recheck(store.get(ID).unwrap()).unwrap_err();
        assert!(matches!(err, MintError::ExceedsMax { requested: 6, minted: 5, .. }));
    }

    #[test]
    fn global_lock_precedes_user_lock_on_public_path() {
        let mut store = store();
        store.set_lock(ID, LockCategory::UserRestricted, true);
        let latch = EntryLatch::new();
        assert_eq!(admit_public(&store, &latch, ID, 1, 3).unwrap_err(), MintError::UserLocked(ID));
        store.set_lock(ID, LockCategory::Global, true);
        assert_eq!(
            admit_public(&store, &latch, ID, 1, 3).unwrap_err(),
            MintError::GloballyLocked(ID)
        );
    }
}
