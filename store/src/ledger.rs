//! Balance ledger trait.

use crate::LedgerError;
use tessera_types::{Address, TokenId};

/// The external store of token balances.
///
/// The core decides *whether* units may be issued; the ledger performs the
/// actual credit. `burn` is also how the core compensates an issuance when a
/// later step of the same mint fails.
pub trait BalanceLedger {
    /// Credit `amount` units of `token` to `recipient`.
    ///
    /// `aux_data` is passed through untouched (receiver hooks may inspect it).
    fn issue(
        &self,
        recipient: &Address,
        token: TokenId,
        amount: u128,
        aux_data: &[u8],
    ) -> Result<(), LedgerError>;

    /// Debit `amount` units of `token` from `holder`.
    fn burn(&self, holder: &Address, token: TokenId, amount: u128) -> Result<(), LedgerError>;

    /// Current balance of `holder` for `token`.
    fn balance_of(&self, holder: &Address, token: TokenId) -> u128;
}
