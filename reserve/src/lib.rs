//! Reservation and mint state machine.
//!
//! A token id moves from unreserved to reserved exactly once, then accepts
//! mints until its hard cap engages the terminal `Global` lock. Every mint
//! passes the admission guard before any balance moves, and the ledger
//! issuance, counter update and fee settlement of one mint either all take
//! effect or none do.
//!
//! Balances, role membership and the pause switch are external; see
//! `tessera-store` for the traits this crate consumes.

mod admin;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod guard;
pub mod latch;
pub mod lock;
pub mod record;
pub mod settlement;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Collaborators, MintEngine, MintReceipt};
pub use error::MintError;
pub use event::{EventBus, ReserveEvent};
pub use guard::{Admission, MintPath};
pub use latch::{EntryLatch, LatchGuard};
pub use lock::{LockCategory, LockSet};
pub use record::ReserveRecord;
pub use settlement::FeeSettlement;
pub use store::ReserveStore;
