//! Replay scripts: an ordered list of operations in TOML.
//!
//! ```toml
//! [[op]]
//! kind = "grant"
//! account = "tsr_admin"
//! role = "default_admin"
//!
//! [[op]]
//! kind = "reserve"
//! caller = "tsr_admin"
//! token = 7
//! max_supply = 100
//! metadata_ref = "7.json"
//! user_limit = 10
//!
//! [[op]]
//! kind = "mint-public"
//! caller = "tsr_alice"
//! token = 7
//! amount = 2
//! payment = 10
//! ```

use serde::{Deserialize, Serialize};
use tessera_types::{Address, Role, TokenId};

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default, rename = "op")]
    pub ops: Vec<Op>,
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Op {
    Grant {
        account: Address,
        role: Role,
    },
    Revoke {
        account: Address,
        role: Role,
    },
    Reserve {
        caller: Address,
        token: TokenId,
        max_supply: u128,
        #[serde(default)]
        metadata_ref: String,
        user_limit: u128,
        #[serde(default)]
        lock_users: bool,
    },
    MintAdmin {
        caller: Address,
        token: TokenId,
        amount: u128,
    },
    MintPublic {
        caller: Address,
        /// Defaults to the caller.
        recipient: Option<Address>,
        token: TokenId,
        amount: u128,
        #[serde(default)]
        payment: u128,
    },
    SetLimit {
        caller: Address,
        token: TokenId,
        limit: u128,
    },
    SetPrice {
        caller: Address,
        token: TokenId,
        price: u128,
    },
    SetMetadata {
        caller: Address,
        token: TokenId,
        metadata_ref: String,
    },
    LockUsers {
        caller: Address,
        token: TokenId,
        locked: bool,
    },
    LockAdmin {
        caller: Address,
        token: TokenId,
        locked: bool,
    },
    Burn {
        caller: Address,
        holder: Address,
        token: TokenId,
        amount: u128,
    },
    Pause,
    Unpause,
    /// Make the payee refuse (or accept again) forwarded fees.
    PayeeRejects {
        reject: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_script() {
        let script = Script::from_toml_str(
            r#"
            [[op]]
            kind = "grant"
            account = "tsr_admin"
            role = "minter"

            [[op]]
            kind = "reserve"
            caller = "tsr_admin"
            token = 3
            max_supply = 50
            user_limit = 5

            [[op]]
            kind = "mint-public"
            caller = "tsr_alice"
            token = 3
            amount = 5

            [[op]]
            kind = "pause"
            "#,
        )
        .unwrap();
        assert_eq!(script.ops.len(), 4);
        assert!(matches!(script.ops[0], Op::Grant { role: Role::Minter, .. }));
        match &script.ops[1] {
            Op::Reserve { token, max_supply, lock_users, metadata_ref, .. } => {
                assert_eq!(*token, TokenId::new(3));
                assert_eq!(*max_supply, 50);
                assert!(!lock_users);
                assert!(metadata_ref.is_empty());
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert!(matches!(
            script.ops[2],
            Op::MintPublic { recipient: None, payment: 0, .. }
        ));
        assert!(matches!(script.ops[3], Op::Pause));
    }

    #[test]
    fn rejects_malformed_address() {
        let err = Script::from_toml_str(
            r#"
            [[op]]
            kind = "mint-admin"
            caller = "admin"
            token = 1
            amount = 1
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn empty_script_has_no_ops() {
        assert!(Script::from_toml_str("").unwrap().ops.is_empty());
    }
}
