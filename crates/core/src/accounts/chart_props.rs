//! Property-based tests for the chart-of-accounts contract.
//!
//! - Ancestor codes are exactly the proper prefixes, in increasing length order
//! - Visibility holds iff every ancestor is expanded
//! - The auto-open set is idempotent once applied

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

use saldo_shared::types::{AccountId, OwnerId};

use super::chart::{ancestors_of, is_visible};
use super::propagate::closed_ancestor_chain;
use super::types::{Account, AccountClass, AccountDirection};

/// Strategy to generate hierarchical account codes (digits, length 1..=6).
fn account_code() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 1..=6)
        .prop_map(|digits| digits.iter().map(ToString::to_string).collect())
}

fn make_account(owner: OwnerId, code: &str, is_open: bool) -> Account {
    Account {
        id: AccountId::new(),
        owner_id: owner,
        name: format!("Account {code}"),
        code: code.to_string(),
        is_open,
        is_read_only: false,
        direction: AccountDirection::Neutral,
        class: AccountClass::Asset,
        opening_balance: Decimal::ZERO,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* code C, `ancestors_of(C)` returns exactly the proper
    /// prefixes of C in increasing length order.
    #[test]
    fn prop_ancestors_are_proper_prefixes(code in account_code()) {
        let ancestors = ancestors_of(&code);

        prop_assert_eq!(ancestors.len(), code.len().saturating_sub(1));
        for (i, ancestor) in ancestors.iter().enumerate() {
            prop_assert_eq!(ancestor.len(), i + 1);
            prop_assert!(code.starts_with(ancestor.as_str()));
        }
    }

    /// *For any* account, visibility holds iff every strict ancestor is in
    /// the expanded set.
    #[test]
    fn prop_visibility_iff_all_ancestors_expanded(
        code in account_code(),
        expand_mask in proptest::collection::vec(any::<bool>(), 6),
    ) {
        let owner = OwnerId::new();
        let account = make_account(owner, &code, true);
        let ancestors = ancestors_of(&code);

        let expanded: HashSet<String> = ancestors
            .iter()
            .zip(expand_mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(c, _)| c.clone())
            .collect();

        let all_expanded = ancestors.iter().all(|c| expanded.contains(c));
        prop_assert_eq!(is_visible(&account, &expanded), all_expanded);
    }

    /// Applying the auto-open set leaves nothing further to open: a second
    /// call on the same account is a no-op.
    #[test]
    fn prop_auto_open_idempotent(
        code in account_code(),
        open_mask in proptest::collection::vec(any::<bool>(), 7),
    ) {
        let owner = OwnerId::new();
        let mut all: Vec<Account> = ancestors_of(&code)
            .iter()
            .zip(open_mask.iter())
            .map(|(c, open)| make_account(owner, c, *open))
            .collect();
        all.push(make_account(owner, &code, *open_mask.last().unwrap()));

        let target = all.last().unwrap().clone();
        let first = closed_ancestor_chain(&target, &all);

        for account in &mut all {
            if first.contains(&account.id) {
                account.is_open = true;
            }
        }

        let target = all.last().unwrap().clone();
        let second = closed_ancestor_chain(&target, &all);
        prop_assert!(second.is_empty(), "second pass should have nothing to open");
    }
}
