//! Nullable fee payee: records every forwarded payment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tessera_store::{PayeeSink, SettlementError};
use tessera_types::Address;

use crate::Hook;

#[derive(Default)]
pub struct NullPayee {
    transfers: Mutex<Vec<(Address, u128)>>,
    rejecting: AtomicBool,
    on_forward: Mutex<Option<Hook>>,
}

impl NullPayee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent forward fail (or succeed again).
    pub fn reject_funds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }

    /// Run `hook` inside the next `forward` call, before funds are accepted.
    pub fn on_next_forward(&self, hook: Hook) {
        *self.on_forward.lock().unwrap() = Some(hook);
    }

    /// Accepted transfers, in order.
    pub fn transfers(&self) -> Vec<(Address, u128)> {
        self.transfers.lock().unwrap().clone()
    }

    /// Total accepted by `payee`.
    pub fn received_by(&self, payee: &Address) -> u128 {
        self.transfers
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == payee)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl PayeeSink for NullPayee {
    fn forward(&self, payee: &Address, amount: u128) -> Result<(), SettlementError> {
        let hook = self.on_forward.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(SettlementError::PayeeRejected(payee.clone()));
        }
        self.transfers.lock().unwrap().push((payee.clone(), amount));
        Ok(())
    }
}
