//! Hierarchical chart-of-accounts contract.
//!
//! Accounts are identified by a dot-less code where prefix relationships
//! define ancestry: the account with code `"112"` has ancestors `"1"` and
//! `"11"`. All functions here are pure and operate on slices of accounts.

use std::collections::HashSet;

use super::types::Account;

/// Returns all proper prefixes of `code`, in increasing length order.
///
/// These are the codes of every ancestor of the account. An empty or
/// single-character code has no ancestors.
#[must_use]
pub fn ancestors_of(code: &str) -> Vec<String> {
    let len = code.chars().count();
    if len <= 1 {
        return Vec::new();
    }
    (1..len)
        .map(|n| code.chars().take(n).collect())
        .collect()
}

/// Returns the direct children of `code`: accounts whose code is exactly
/// one character longer and starts with `code`.
#[must_use]
pub fn children_of<'a>(code: &str, all: &'a [Account]) -> Vec<&'a Account> {
    let child_len = code.chars().count() + 1;
    all.iter()
        .filter(|a| a.code.chars().count() == child_len && a.code.starts_with(code))
        .collect()
}

/// Returns true if the account has at least one direct child.
#[must_use]
pub fn has_children(account: &Account, all: &[Account]) -> bool {
    !children_of(&account.code, all).is_empty()
}

/// Returns true if the account is visible given the set of expanded codes.
///
/// An account is visible iff every strict ancestor code is present in
/// `expanded`. Root-level accounts (code length <= 1) are always visible.
#[must_use]
pub fn is_visible(account: &Account, expanded: &HashSet<String>) -> bool {
    ancestors_of(&account.code)
        .iter()
        .all(|ancestor| expanded.contains(ancestor))
}

/// Sorts accounts into display order: lexicographic by code.
pub fn display_order(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| a.code.cmp(&b.code));
}

/// Returns true if the account is open while at least one of its ancestors
/// is closed.
///
/// Closing an ancestor never cascades to descendants, so this state can
/// arise from normal edits; it is flagged for the user, not prevented.
#[must_use]
pub fn has_invalid_config(account: &Account, all: &[Account]) -> bool {
    if !account.is_open {
        return false;
    }
    let ancestors = ancestors_of(&account.code);
    all.iter().any(|a| {
        a.owner_id == account.owner_id && !a.is_open && ancestors.iter().any(|c| *c == a.code)
    })
}
