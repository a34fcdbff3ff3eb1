//! Administrative operations on the mint engine.
//!
//! Every operation is authorized against the oracle first. None of them take
//! the entry latch; they serialize on the store write lock instead.

use std::sync::PoisonError;

use tessera_types::{Address, Role, TokenId};
use tracing::info;

use crate::engine::MintEngine;
use crate::error::MintError;
use crate::event::ReserveEvent;
use crate::guard::require_role;
use crate::lock::LockCategory;

impl MintEngine {
    /// Reserve `id` with its hard cap, metadata reference and initial user
    /// limit. Requires [`Role::DefaultAdmin`]. One-shot per id.
    pub fn reserve(
        &self,
        caller: &Address,
        id: TokenId,
        max_supply: u128,
        metadata_ref: impl Into<String>,
        user_limit: u128,
        lock_users: bool,
    ) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::DefaultAdmin)?;
        let sequence = {
            let mut store = self.write_store();
            store.reserve(id, max_supply, metadata_ref, user_limit, lock_users)?;
            store.reserved_count() - 1
        };
        info!(%id, sequence, max_supply, user_limit, lock_users, "token reserved");
        self.emit(ReserveEvent::Reserved {
            token: id,
            sequence,
            max_supply,
            user_limit,
            users_locked: lock_users,
        });
        Ok(())
    }

    /// Set the public-path ceiling. Values below the current minted count are
    /// raised to it. Returns the stored limit.
    pub fn set_user_limit(
        &self,
        caller: &Address,
        id: TokenId,
        limit: u128,
    ) -> Result<u128, MintError> {
        require_role(self.authority.as_ref(), caller, Role::DefaultAdmin)?;
        let stored = self
            .write_store()
            .set_user_limit(id, limit)
            .ok_or(MintError::NotReserved(id))?;
        info!(%id, requested = limit, limit = stored, "user limit changed");
        self.emit(ReserveEvent::LimitChanged {
            token: id,
            requested: limit,
            limit: stored,
        });
        Ok(stored)
    }

    pub fn set_price(&self, caller: &Address, id: TokenId, price: u128) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::DefaultAdmin)?;
        self.write_store()
            .set_price(id, price)
            .ok_or(MintError::NotReserved(id))?;
        info!(%id, price, "price changed");
        self.emit(ReserveEvent::PriceChanged { token: id, price });
        Ok(())
    }

    /// Replace the metadata reference of `id`. Requires [`Role::UriSetter`].
    pub fn set_metadata_ref(
        &self,
        caller: &Address,
        id: TokenId,
        metadata_ref: impl Into<String>,
    ) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::UriSetter)?;
        let metadata_ref = metadata_ref.into();
        if !self.write_store().set_metadata_ref(id, metadata_ref.clone()) {
            return Err(MintError::NotReserved(id));
        }
        info!(%id, %metadata_ref, "metadata reference changed");
        self.emit(ReserveEvent::MetadataChanged {
            token: id,
            metadata_ref,
        });
        Ok(())
    }

    /// Replace the collection-wide URI prefix. Requires [`Role::UriSetter`].
    pub fn set_base_uri(&self, caller: &Address, base_uri: impl Into<String>) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::UriSetter)?;
        let base_uri = base_uri.into();
        info!(%base_uri, "base uri changed");
        *self.base_uri.write().unwrap_or_else(PoisonError::into_inner) = base_uri;
        Ok(())
    }

    /// Engage or release the public-path lock of `id`.
    ///
    /// Rejected with [`MintError::GloballyLocked`] once the hard cap has been
    /// reached.
    pub fn set_user_lock(&self, caller: &Address, id: TokenId, locked: bool) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::DefaultAdmin)?;
        let changed = {
            let mut store = self.write_store();
            if !store.is_reserved(id) {
                return Err(MintError::NotReserved(id));
            }
            if store.is_locked(id, LockCategory::Global) {
                return Err(MintError::GloballyLocked(id));
            }
            store.set_lock(id, LockCategory::UserRestricted, locked)
        };
        self.lock_toggled(id, LockCategory::UserRestricted, locked, changed);
        Ok(())
    }

    /// Engage or release the administrative lock flag of `id`.
    pub fn set_admin_lock(&self, caller: &Address, id: TokenId, locked: bool) -> Result<(), MintError> {
        require_role(self.authority.as_ref(), caller, Role::DefaultAdmin)?;
        let changed = {
            let mut store = self.write_store();
            if !store.is_reserved(id) {
                return Err(MintError::NotReserved(id));
            }
            store.set_lock(id, LockCategory::AdminRestricted, locked)
        };
        self.lock_toggled(id, LockCategory::AdminRestricted, locked, changed);
        Ok(())
    }

    fn lock_toggled(&self, id: TokenId, category: LockCategory, locked: bool, changed: bool) {
        if !changed {
            return;
        }
        info!(%id, %category, locked, "lock toggled");
        self.emit(ReserveEvent::LockToggled {
            token: id,
            category,
            locked,
        });
    }
}
