//! Mint engine: commits admitted mints against the external ledger and the
//! reserve store as one logical transaction.
//!
//! The host is not transactional, so atomicity is a compensating-action
//! sequence: issue → re-check and count → settle. When a step fails, every
//! step that already succeeded is reversed before the error is returned.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tessera_store::{AuthorizationOracle, BalanceLedger, PauseFlag, PayeeSink};
use tessera_types::{Address, Role, TokenId};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::MintError;
use crate::event::{EventBus, ReserveEvent};
use crate::guard::{self, Admission};
use crate::latch::EntryLatch;
use crate::lock::LockCategory;
use crate::record::ReserveRecord;
use crate::settlement::FeeSettlement;
use crate::store::ReserveStore;

/// The external services an engine is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub authority: Arc<dyn AuthorizationOracle + Send + Sync>,
    pub pause: Arc<dyn PauseFlag + Send + Sync>,
    pub ledger: Arc<dyn BalanceLedger + Send + Sync>,
    pub payee_sink: Arc<dyn PayeeSink + Send + Sync>,
}

/// Outcome of a committed mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MintReceipt {
    pub token: TokenId,
    pub recipient: Address,
    pub amount: u128,
    /// Counter value after this mint.
    pub minted_count: u128,
    /// Whether this mint hit the hard cap.
    pub global_locked: bool,
    /// Value forwarded to the payee (public path only).
    pub fee_forwarded: u128,
}

/// The reservation / mint state machine.
///
/// All methods take `&self`; the engine is meant to be shared behind an
/// `Arc`. Mints are serialized by the entry latch, administrative edits by
/// the store lock, and reads share the store read lock.
pub struct MintEngine {
    pub(crate) store: RwLock<ReserveStore>,
    pub(crate) base_uri: RwLock<String>,
    latch: EntryLatch,
    pub(crate) authority: Arc<dyn AuthorizationOracle + Send + Sync>,
    pause: Arc<dyn PauseFlag + Send + Sync>,
    ledger: Arc<dyn BalanceLedger + Send + Sync>,
    settlement: FeeSettlement,
    events: EventBus,
}

impl MintEngine {
    pub fn new(config: &EngineConfig, collaborators: Collaborators) -> Self {
        Self {
            store: RwLock::new(ReserveStore::new()),
            base_uri: RwLock::new(config.base_uri.clone()),
            latch: EntryLatch::new(),
            authority: collaborators.authority,
            pause: collaborators.pause,
            ledger: collaborators.ledger,
            settlement: FeeSettlement::new(collaborators.payee_sink, config.payee.clone()),
            events: EventBus::new(),
        }
    }

    /// Register a listener for committed state changes.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ReserveEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Mint entry points ──────────────────────────────────────────────

    /// Mint `amount` units of `id` to the treasury. Requires [`Role::Minter`].
    pub fn mint_admin(
        &self,
        caller: &Address,
        id: TokenId,
        amount: u128,
    ) -> Result<MintReceipt, MintError> {
        let admission = {
            let store = self.read_store();
            guard::admit_admin(&store, self.authority.as_ref(), &self.latch, caller, id, amount)
        }
        .inspect_err(|e| debug!(%caller, %id, amount, error = %e, "admin mint rejected"))?;

        let recipient = self.settlement.payee().clone();
        self.execute(admission, &recipient, None)
    }

    /// Mint `amount` units of `id` to `recipient` against `payment`.
    ///
    /// The whole payment is forwarded to the payee once the units are issued
    /// and counted; if forwarding fails the mint is undone.
    pub fn mint_public(
        &self,
        caller: &Address,
        recipient: &Address,
        id: TokenId,
        amount: u128,
        payment: u128,
    ) -> Result<MintReceipt, MintError> {
        let admission = {
            let store = self.read_store();
            guard::admit_public(&store, &self.latch, id, amount, payment)
        }
        .inspect_err(|e| debug!(%caller, %id, amount, payment, error = %e, "public mint rejected"))?;

        self.execute(admission, recipient, Some(payment))
    }

    /// Run the mutating half of a mint. `payment` is `Some` on the public path.
    ///
    /// The admission keeps the entry latch engaged until this returns; no
    /// store lock is held across a collaborator call.
    fn execute(
        &self,
        admission: Admission<'_>,
        recipient: &Address,
        payment: Option<u128>,
    ) -> Result<MintReceipt, MintError> {
        let id = admission.snapshot.id;
        let amount = admission.amount;

        if self.pause.is_paused() {
            debug!(%id, amount, "mint rejected: collection paused");
            return Err(MintError::Paused);
        }

        if let Err(e) = self.ledger.issue(recipient, id, amount, &[]) {
            warn!(%id, %recipient, amount, error = %e, "ledger refused issuance");
            return Err(e.into());
        }

        // Admin edits may have landed while the ledger ran; bounds are checked
        // again under the same write lock that moves the counter.
        let committed = {
            let mut store = self.write_store();
            let current = store.get(id).ok_or(MintError::NotReserved(id));
            match current.and_then(|record| admission.recheck(record)) {
                Ok(()) => store
                    .record_mint(id, amount)
                    .cloned()
                    .ok_or(MintError::NotReserved(id)),
                Err(e) => Err(e),
            }
        };
        let record = match committed {
            Ok(record) => record,
            Err(e) => {
                warn!(%id, %recipient, amount, error = %e, "record changed during mint, rolling back issuance");
                self.compensate_issue(recipient, id, amount);
                return Err(e);
            }
        };

        let fee_forwarded = match payment {
            Some(received) => match self.settlement.settle(id, received) {
                Ok(()) => received,
                Err(e) => {
                    warn!(%id, %recipient, amount, received, error = %e, "fee settlement failed, rolling back mint");
                    self.write_store().restore(&admission.snapshot);
                    self.compensate_issue(recipient, id, amount);
                    return Err(e.into());
                }
            },
            None => 0,
        };

        admission.release();

        let global_locked = record.is_locked(LockCategory::Global);
        info!(
            %id,
            %recipient,
            amount,
            minted_count = record.minted_count,
            max_supply = record.max_supply,
            fee_forwarded,
            "mint committed"
        );
        if global_locked {
            info!(%id, "hard cap reached, token globally locked");
        }

        let receipt = MintReceipt {
            token: id,
            recipient: recipient.clone(),
            amount,
            minted_count: record.minted_count,
            global_locked,
            fee_forwarded,
        };
        self.events.emit(&ReserveEvent::Minted {
            token: id,
            recipient: recipient.clone(),
            amount,
            minted_count: record.minted_count,
            global_locked,
        });
        if global_locked {
            self.events.emit(&ReserveEvent::LockToggled {
                token: id,
                category: LockCategory::Global,
                locked: true,
            });
        }
        Ok(receipt)
    }

    /// Reverse a successful issuance.
    fn compensate_issue(&self, recipient: &Address, id: TokenId, amount: u128) {
        if let Err(e) = self.ledger.burn(recipient, id, amount) {
            error!(
                %id,
                %recipient,
                amount,
                error = %e,
                "failed to reverse issuance; ledger holds units the counter does not"
            );
        }
    }

    // ── Burn ───────────────────────────────────────────────────────────

    /// Burn `amount` units of `id` held by `holder`. Requires [`Role::Burner`].
    ///
    /// Burning does not lower `minted_count`: the hard cap bounds units ever
    /// issued, not units outstanding.
    pub fn burn(
        &self,
        caller: &Address,
        holder: &Address,
        id: TokenId,
        amount: u128,
    ) -> Result<(), MintError> {
        guard::require_role(self.authority.as_ref(), caller, Role::Burner)?;
        if !self.is_reserved(id) {
            return Err(MintError::NotReserved(id));
        }
        if self.pause.is_paused() {
            return Err(MintError::Paused);
        }
        self.ledger.burn(holder, id, amount)?;
        info!(%id, %holder, amount, "burned");
        self.events.emit(&ReserveEvent::Burned {
            token: id,
            holder: holder.clone(),
            amount,
        });
        Ok(())
    }

    // ── Read accessors ─────────────────────────────────────────────────

    pub fn is_reserved(&self, id: TokenId) -> bool {
        self.read_store().is_reserved(id)
    }

    /// A copy of the record for `id`.
    pub fn record(&self, id: TokenId) -> Option<ReserveRecord> {
        self.read_store().get(id).cloned()
    }

    pub fn max_supply(&self, id: TokenId) -> Option<u128> {
        self.read_store().max_supply(id)
    }

    pub fn user_limit(&self, id: TokenId) -> Option<u128> {
        self.read_store().user_limit(id)
    }

    pub fn minted_count(&self, id: TokenId) -> Option<u128> {
        self.read_store().minted_count(id)
    }

    pub fn price(&self, id: TokenId) -> Option<u128> {
        self.read_store().price(id)
    }

    /// Lock state; unreserved ids read as unlocked.
    pub fn is_locked(&self, id: TokenId, category: LockCategory) -> bool {
        self.read_store().is_locked(id, category)
    }

    /// Reserved ids in reservation order.
    pub fn reservation_history(&self) -> Vec<TokenId> {
        self.read_store().history().to_vec()
    }

    pub fn reserved_count(&self) -> usize {
        self.read_store().reserved_count()
    }

    pub fn reserved_at(&self, seq: usize) -> Option<TokenId> {
        self.read_store().reserved_at(seq)
    }

    /// Full metadata URI of `id`: base URI followed by the metadata reference.
    pub fn uri(&self, id: TokenId) -> Option<String> {
        let store = self.read_store();
        let metadata_ref = store.metadata_ref(id)?;
        let base = self.base_uri.read().unwrap_or_else(PoisonError::into_inner);
        Some(format!("{base}{metadata_ref}"))
    }

    pub fn payee(&self) -> &Address {
        self.settlement.payee()
    }

    /// Whether a mint call is in flight.
    pub fn is_minting(&self) -> bool {
        self.latch.is_engaged()
    }

    pub fn balance_of(&self, holder: &Address, id: TokenId) -> u128 {
        self.ledger.balance_of(holder, id)
    }

    // ── Internals ──────────────────────────────────────────────────────

    pub(crate) fn read_store(&self) -> RwLockReadGuard<'_, ReserveStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_store(&self) -> RwLockWriteGuard<'_, ReserveStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn emit(&self, event: ReserveEvent) {
        self.events.emit(&event);
    }
}
