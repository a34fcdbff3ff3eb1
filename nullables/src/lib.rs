//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator of the mint core (role oracle, pause flag, balance
//! ledger, fee payee) is abstracted behind a trait in `tessera-store`. This
//! crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (grants, pause, failure injection)
//! - Can run a one-shot hook in the middle of a call, to drive re-entrancy
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests and local replays.

pub mod authority;
pub mod ledger;
pub mod pause;
pub mod payee;

pub use authority::NullAuthority;
pub use ledger::NullLedger;
pub use pause::NullPause;
pub use payee::NullPayee;

/// A callback fired once from inside a collaborator call.
pub type Hook = Box<dyn FnOnce() + Send>;
