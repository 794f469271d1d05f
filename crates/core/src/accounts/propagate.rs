//! Auto-open propagation for referenced accounts.
//!
//! When a transaction references an account, that account and every closed
//! ancestor must be opened. This module computes the open-set; the store
//! applies it as one batch. The computation is an explicit, named step in
//! the creation pipeline so ordering and idempotence are testable in
//! isolation.

use saldo_shared::types::AccountId;

use super::chart::ancestors_of;
use super::types::Account;

/// Computes the set of accounts to open when `account` is referenced.
///
/// Includes the account itself (if closed) and every closed account owned
/// by the same owner whose code is a prefix of the account's code. Accounts
/// without a code contribute only themselves. The result is empty when the
/// account and all of its ancestors are already open, which makes applying
/// the batch idempotent: only closed accounts ever transition, and only
/// towards open.
#[must_use]
pub fn closed_ancestor_chain(account: &Account, all: &[Account]) -> Vec<AccountId> {
    let mut to_open = Vec::new();

    if !account.is_open {
        to_open.push(account.id);
    }

    if account.code.is_empty() {
        return to_open;
    }

    let mut prefixes = ancestors_of(&account.code);
    prefixes.push(account.code.clone());

    for other in all {
        if other.id == account.id || other.owner_id != account.owner_id || other.is_open {
            continue;
        }
        if prefixes.iter().any(|p| *p == other.code) {
            to_open.push(other.id);
        }
    }

    to_open
}
