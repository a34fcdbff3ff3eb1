//! Abstract collaborator traits for Tessera.
//!
//! The mint core never owns balances, role membership or the pause switch.
//! Each of those lives behind one of these traits; production hosts plug in
//! their own backends and tests use `tessera-nullables`. The rest of the
//! codebase depends only on the traits.

pub mod authority;
pub mod error;
pub mod ledger;
pub mod pause;
pub mod payee;

pub use authority::AuthorizationOracle;
pub use error::{LedgerError, SettlementError};
pub use ledger::BalanceLedger;
pub use pause::PauseFlag;
pub use payee::PayeeSink;
