//! Nullable authorization oracle: an in-memory role table.

use std::collections::HashSet;
use std::sync::Mutex;

use tessera_store::AuthorizationOracle;
use tessera_types::{Address, Role};

#[derive(Default)]
pub struct NullAuthority {
    grants: Mutex<HashSet<(Address, Role)>>,
}

impl NullAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant every role to `admin`.
    pub fn with_superuser(admin: &Address) -> Self {
        let authority = Self::new();
        for role in Role::ALL {
            authority.grant(admin, role);
        }
        authority
    }

    pub fn grant(&self, account: &Address, role: Role) {
        self.grants.lock().unwrap().insert((account.clone(), role));
    }

    pub fn revoke(&self, account: &Address, role: Role) {
        self.grants.lock().unwrap().remove(&(account.clone(), role));
    }
}

impl AuthorizationOracle for NullAuthority {
    fn has_role(&self, caller: &Address, role: Role) -> bool {
        self.grants.lock().unwrap().contains(&(caller.clone(), role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke() {
        let alice = Address::new("tsr_alice");
        let authority = NullAuthority::new();
        assert!(!authority.has_role(&alice, Role::Minter));
        authority.grant(&alice, Role::Minter);
        assert!(authority.has_role(&alice, Role::Minter));
        assert!(!authority.has_role(&alice, Role::Burner));
        authority.revoke(&alice, Role::Minter);
        assert!(!authority.has_role(&alice, Role::Minter));
    }

    #[test]
    fn superuser_holds_every_role() {
        let root = Address::new("tsr_root");
        let authority = NullAuthority::with_superuser(&root);
        assert!(Role::ALL.iter().all(|r| authority.has_role(&root, *r)));
    }
}
