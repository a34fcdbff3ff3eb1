use tessera_types::{Address, Role};

/// Answers role-membership questions for the core.
///
/// The membership store itself (grants, revocations, admin hierarchy) is
/// outside the core.
pub trait AuthorizationOracle {
    fn has_role(&self, caller: &Address, role: Role) -> bool;
}
