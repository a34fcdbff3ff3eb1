use tessera_types::{Address, TokenId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("recipient {0} rejected the transfer")]
    RecipientRejected(Address),

    #[error("insufficient balance of {token} for {holder}: need {needed}, have {available}")]
    InsufficientBalance {
        holder: Address,
        token: TokenId,
        needed: u128,
        available: u128,
    },

    #[error("balance overflow for {holder} on {token}")]
    Overflow { holder: Address, token: TokenId },

    #[error("ledger backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("payee {0} rejected the funds")]
    PayeeRejected(Address),

    #[error("settlement backend error: {0}")]
    Backend(String),
}
