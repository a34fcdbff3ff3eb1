//! Fundamental types for Tessera.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: token identifiers, account addresses and permission roles.

pub mod address;
pub mod role;
pub mod token_id;

pub use address::{Address, AddressError};
pub use role::Role;
pub use token_id::TokenId;
