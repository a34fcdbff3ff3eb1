//! Supply notifications for external auditing.

use serde::Serialize;
use tessera_types::{Address, TokenId};

use crate::lock::LockCategory;

/// Events emitted after a state change has committed.
///
/// A mint that rolls back emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReserveEvent {
    /// A token id was reserved.
    Reserved {
        token: TokenId,
        sequence: usize,
        max_supply: u128,
        user_limit: u128,
        users_locked: bool,
    },
    /// Units were issued and counted.
    Minted {
        token: TokenId,
        recipient: Address,
        amount: u128,
        minted_count: u128,
        global_locked: bool,
    },
    /// A lock flag changed value.
    LockToggled {
        token: TokenId,
        category: LockCategory,
        locked: bool,
    },
    /// The user limit was (re)written; `limit` is the stored value after clamping.
    LimitChanged {
        token: TokenId,
        requested: u128,
        limit: u128,
    },
    PriceChanged {
        token: TokenId,
        price: u128,
    },
    MetadataChanged {
        token: TokenId,
        metadata_ref: String,
    },
    /// Units were burned; `minted_count` is unaffected.
    Burned {
        token: TokenId,
        holder: Address,
        amount: u128,
    },
}

impl ReserveEvent {
    pub fn token(&self) -> TokenId {
        match self {
            Self::Reserved { token, .. }
            | Self::Minted { token, .. }
            | Self::LockToggled { token, .. }
            | Self::LimitChanged { token, .. }
            | Self::PriceChanged { token, .. }
            | Self::MetadataChanged { token, .. }
            | Self::Burned { token, .. } => *token,
        }
    }
}

/// Synchronous fan-out bus for reserve events.
///
/// Listeners run inline on the emitting thread, after every store lock has
/// been released, so they may read the engine.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ReserveEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ReserveEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ReserveEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
