use crate::SettlementError;
use tessera_types::Address;

/// Destination for fees collected on the public mint path.
///
/// `forward` moves value the core has already received; a rejection makes the
/// whole mint roll back.
pub trait PayeeSink {
    fn forward(&self, payee: &Address, amount: u128) -> Result<(), SettlementError>;
}
