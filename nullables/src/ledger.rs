//! Nullable balance ledger: thread-safe in-memory balances for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tessera_store::{BalanceLedger, LedgerError};
use tessera_types::{Address, TokenId};

use crate::Hook;

/// An in-memory ledger with failure injection.
///
/// - recipients added with [`NullLedger::reject_recipient`] refuse issuance;
/// - [`NullLedger::fail_burns`] makes every burn fail;
/// - [`NullLedger::on_next_issue`] runs a hook inside the next `issue` call,
///   before the balance is credited.
#[derive(Default)]
pub struct NullLedger {
    balances: Mutex<HashMap<(Address, TokenId), u128>>,
    rejecting: Mutex<HashSet<Address>>,
    fail_burns: AtomicBool,
    issue_calls: AtomicUsize,
    on_issue: Mutex<Option<Hook>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_recipient(&self, recipient: &Address) {
        self.rejecting.lock().unwrap().insert(recipient.clone());
    }

    pub fn fail_burns(&self, fail: bool) {
        self.fail_burns.store(fail, Ordering::SeqCst);
    }

    pub fn on_next_issue(&self, hook: Hook) {
        *self.on_issue.lock().unwrap() = Some(hook);
    }

    /// Number of `issue` calls seen, successful or not.
    pub fn issue_calls(&self) -> usize {
        self.issue_calls.load(Ordering::SeqCst)
    }

    /// Sum of all balances of `token`.
    pub fn outstanding(&self, token: TokenId) -> u128 {
        self.balances
            .lock()
            .unwrap()
            .iter()
            .filter(|((_, t), _)| *t == token)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl BalanceLedger for NullLedger {
    fn issue(
        &self,
        recipient: &Address,
        token: TokenId,
        amount: u128,
        _aux_data: &[u8],
    ) -> Result<(), LedgerError> {
        self.issue_calls.fetch_add(1, Ordering::SeqCst);
        let hook = self.on_issue.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        if self.rejecting.lock().unwrap().contains(recipient) {
            return Err(LedgerError::RecipientRejected(recipient.clone()));
        }
        let mut balances = self.balances.lock().unwrap();
        let balance = balances.entry((recipient.clone(), token)).or_default();
        *balance = balance.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
            holder: recipient.clone(),
            token,
        })?;
        Ok(())
    }

    fn burn(&self, holder: &Address, token: TokenId, amount: u128) -> Result<(), LedgerError> {
        if self.fail_burns.load(Ordering::SeqCst) {
            return Err(LedgerError::Backend("burns disabled".into()));
        }
        let mut balances = self.balances.lock().unwrap();
        let available = balances.get(&(holder.clone(), token)).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                holder: holder.clone(),
                token,
                needed: amount,
                available,
            });
        }
        balances.insert((holder.clone(), token), available - amount);
        Ok(())
    }

    fn balance_of(&self, holder: &Address, token: TokenId) -> u128 {
        self.balances
            .lock()
            .unwrap()
            .get(&(holder.clone(), token))
            .copied()
            .unwrap_or(0)
    }
}
