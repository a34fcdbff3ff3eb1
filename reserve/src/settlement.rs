//! Fee settlement: the terminal step of a public mint.

use std::sync::Arc;

use tessera_store::{PayeeSink, SettlementError};
use tessera_types::{Address, TokenId};
use tracing::debug;

/// Forwards public-mint payments to the configured payee.
///
/// The whole received amount is forwarded: overpayment is neither split nor
/// refunded.
pub struct FeeSettlement {
    sink: Arc<dyn PayeeSink + Send + Sync>,
    payee: Address,
}

impl FeeSettlement {
    pub fn new(sink: Arc<dyn PayeeSink + Send + Sync>, payee: Address) -> Self {
        Self { sink, payee }
    }

    /// The treasury that receives fees and admin mints.
    pub fn payee(&self) -> &Address {
        &self.payee
    }

    pub fn settle(&self, token: TokenId, received: u128) -> Result<(), SettlementError> {
        debug!(%token, payee = %self.payee, received, "forwarding mint fee");
        self.sink.forward(&self.payee, received)
    }
}
