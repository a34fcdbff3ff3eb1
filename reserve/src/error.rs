//! Mint-core errors.

use tessera_store::{LedgerError, SettlementError};
use tessera_types::{Address, Role, TokenId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("token {0} is already reserved")]
    AlreadyReserved(TokenId),

    #[error("token {0} is not reserved")]
    NotReserved(TokenId),

    #[error("token {0} is globally locked")]
    GloballyLocked(TokenId),

    #[error("token {0} is locked for public minting")]
    UserLocked(TokenId),

    #[error("minting {requested} of {token} exceeds max supply: minted {minted}, max {max}")]
    ExceedsMax {
        token: TokenId,
        requested: u128,
        minted: u128,
        max: u128,
    },

    #[error("minting {requested} of {token} exceeds user limit: minted {minted}, limit {limit}")]
    ExceedsUserLimit {
        token: TokenId,
        requested: u128,
        minted: u128,
        limit: u128,
    },

    #[error("insufficient payment for {token}: need {required}, got {supplied}")]
    InsufficientPayment {
        token: TokenId,
        required: u128,
        supplied: u128,
    },

    #[error("{caller} lacks role {role}")]
    Unauthorized { caller: Address, role: Role },

    #[error("collection is paused")]
    Paused,

    #[error("mint call already in flight")]
    ReentrantCall,

    #[error("ledger failure: {0}")]
    LedgerFailure(#[from] LedgerError),

    #[error("fee settlement failure: {0}")]
    SettlementFailure(#[from] SettlementError),
}

impl MintError {
    /// Whether the ledger or the payee refused the call, as opposed to a
    /// precondition rejected by the engine itself.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::LedgerFailure(_) | Self::SettlementFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_are_told_apart_from_rejections() {
        let payee = Address::new("tsr_treasury");
        assert!(MintError::from(SettlementError::PayeeRejected(payee.clone())).is_collaborator_failure());
        assert!(MintError::from(LedgerError::RecipientRejected(payee)).is_collaborator_failure());
        assert!(!MintError::ReentrantCall.is_collaborator_failure());
        assert!(!MintError::ExceedsUserLimit {
            token: TokenId::new(1),
            requested: 5,
            minted: 0,
            limit: 0,
        }
        .is_collaborator_failure());
    }
}
