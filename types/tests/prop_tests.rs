use proptest::prelude::*;

use tessera_types::{Address, Role, TokenId};

proptest! {
    /// Any non-empty suffix behind the prefix parses and displays unchanged.
    #[test]
    fn address_parse_accepts_prefixed(suffix in "[a-z0-9_]{1,40}") {
        let raw = format!("tsr_{suffix}");
        let address = Address::parse(raw.clone()).unwrap();
        prop_assert_eq!(address.to_string(), raw);
    }

    /// Strings without the prefix are always rejected.
    #[test]
    fn address_parse_rejects_unprefixed(raw in "[a-z0-9]{1,40}") {
        prop_assume!(!raw.starts_with("tsr_"));
        prop_assert!(Address::parse(raw).is_err());
    }

    /// TokenId ordering follows the raw id.
    #[test]
    fn token_id_order_matches_raw(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(TokenId::new(a).cmp(&TokenId::new(b)), a.cmp(&b));
    }
}

#[test]
fn role_names_are_unique() {
    let mut names: Vec<_> = Role::ALL.iter().map(|r| r.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Role::ALL.len());
}
