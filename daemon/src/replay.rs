//! Runs a script against a [`MintEngine`] wired to nullable collaborators.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tessera_nullables::{NullAuthority, NullLedger, NullPause, NullPayee};
use tessera_reserve::{
    Collaborators, EngineConfig, LockCategory, MintEngine, MintError, ReserveEvent,
};
use tessera_types::TokenId;
use tracing::{info, warn};

use crate::script::Op;

/// Result of one scripted operation.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub step: usize,
    pub op: Op,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-token supply snapshot.
#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub token: TokenId,
    pub sequence: usize,
    pub minted_count: u128,
    pub max_supply: u128,
    pub user_limit: u128,
    pub unit_price: u128,
    pub locks: Vec<LockCategory>,
    pub uri: String,
    pub outstanding: u128,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub payee: String,
    pub fees_received: u128,
    pub tokens: Vec<TokenReport>,
    pub outcomes: Vec<Outcome>,
    pub events: Vec<ReserveEvent>,
}

pub struct Replay {
    engine: MintEngine,
    authority: Arc<NullAuthority>,
    pause: Arc<NullPause>,
    ledger: Arc<NullLedger>,
    payee: Arc<NullPayee>,
    events: Arc<Mutex<Vec<ReserveEvent>>>,
}

impl Replay {
    pub fn new(config: &EngineConfig) -> Self {
        let authority = Arc::new(NullAuthority::new());
        let pause = Arc::new(NullPause::new());
        let ledger = Arc::new(NullLedger::new());
        let payee = Arc::new(NullPayee::new());
        let mut engine = MintEngine::new(
            config,
            Collaborators {
                authority: authority.clone(),
                pause: pause.clone(),
                ledger: ledger.clone(),
                payee_sink: payee.clone(),
            },
        );
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        engine.subscribe(Box::new(move |event| {
            if let Ok(mut events) = sink.lock() {
                events.push(event.clone());
            }
        }));
        Self {
            engine,
            authority,
            pause,
            ledger,
            payee,
            events,
        }
    }

    /// Apply every op in order. Failures are recorded, not fatal.
    pub fn run(&self, ops: Vec<Op>) -> Vec<Outcome> {
        ops.into_iter()
            .enumerate()
            .map(|(step, op)| {
                let error = match self.apply(&op) {
                    Ok(()) => {
                        info!(step, ?op, "applied");
                        None
                    }
                    Err(e) => {
                        warn!(step, ?op, error = %e, "rejected");
                        Some(e.to_string())
                    }
                };
                Outcome { step, op, error }
            })
            .collect()
    }

    fn apply(&self, op: &Op) -> Result<(), MintError> {
        let engine = &self.engine;
        match op {
            Op::Grant { account, role } => self.authority.grant(account, *role),
            Op::Revoke { account, role } => self.authority.revoke(account, *role),
            Op::Reserve {
                caller,
                token,
                max_supply,
                metadata_ref,
                user_limit,
                lock_users,
            } => engine.reserve(
                caller,
                *token,
                *max_supply,
                metadata_ref.clone(),
                *user_limit,
                *lock_users,
            )?,
            Op::MintAdmin {
                caller,
                token,
                amount,
            } => {
                engine.mint_admin(caller, *token, *amount)?;
            }
            Op::MintPublic {
                caller,
                recipient,
                token,
                amount,
                payment,
            } => {
                let recipient = recipient.as_ref().unwrap_or(caller);
                engine.mint_public(caller, recipient, *token, *amount, *payment)?;
            }
            Op::SetLimit {
                caller,
                token,
                limit,
            } => {
                engine.set_user_limit(caller, *token, *limit)?;
            }
            Op::SetPrice {
                caller,
                token,
                price,
            } => engine.set_price(caller, *token, *price)?,
            Op::SetMetadata {
                caller,
                token,
                metadata_ref,
            } => engine.set_metadata_ref(caller, *token, metadata_ref.clone())?,
            Op::LockUsers {
                caller,
                token,
                locked,
            } => engine.set_user_lock(caller, *token, *locked)?,
            Op::LockAdmin {
                caller,
                token,
                locked,
            } => engine.set_admin_lock(caller, *token, *locked)?,
            Op::Burn {
                caller,
                holder,
                token,
                amount,
            } => engine.burn(caller, holder, *token, *amount)?,
            Op::Pause => self.pause.pause(),
            Op::Unpause => self.pause.unpause(),
            Op::PayeeRejects { reject } => self.payee.reject_funds(*reject),
        }
        Ok(())
    }

    pub fn report(&self, outcomes: Vec<Outcome>) -> Report {
        let engine = &self.engine;
        let tokens = engine
            .reservation_history()
            .into_iter()
            .enumerate()
            .filter_map(|(sequence, token)| {
                let record = engine.record(token)?;
                Some(TokenReport {
                    token,
                    sequence,
                    minted_count: record.minted_count,
                    max_supply: record.max_supply,
                    user_limit: record.user_limit,
                    unit_price: record.unit_price,
                    locks: record.locks.engaged().collect(),
                    uri: engine.uri(token).unwrap_or_default(),
                    outstanding: self.ledger.outstanding(token),
                })
            })
            .collect();
        let events = self
            .events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default();
        Report {
            payee: engine.payee().to_string(),
            fees_received: self.payee.received_by(engine.payee()),
            tokens,
            outcomes,
            events,
        }
    }
}
