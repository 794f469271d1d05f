//! Account typing and ownership validation.

use saldo_shared::types::{AccountId, OwnerId};

use super::error::AccountError;
use super::types::{Account, AccountDirection, EntryRole};

/// Validates that the account may be used in the given role.
///
/// A debit-only account cannot be the credit side and a credit-only account
/// cannot be the debit side; neutral accounts permit both roles.
///
/// # Errors
///
/// Returns [`AccountError::RoleMismatch`] naming the offending account.
pub fn validate_role(account: &Account, role: EntryRole) -> Result<(), AccountError> {
    let conflict = matches!(
        (account.direction, role),
        (AccountDirection::Debit, EntryRole::Credit) | (AccountDirection::Credit, EntryRole::Debit)
    );
    if conflict {
        return Err(AccountError::RoleMismatch {
            account_id: account.id,
            direction: account.direction,
            role,
        });
    }
    Ok(())
}

/// Validates that the account is not read-only.
///
/// # Errors
///
/// Returns [`AccountError::ReadOnly`] if the account is read-only.
pub fn validate_not_read_only(account: &Account) -> Result<(), AccountError> {
    if account.is_read_only {
        return Err(AccountError::ReadOnly(account.id));
    }
    Ok(())
}

/// Resolves an account reference, rejecting missing and cross-owner ids.
///
/// Cross-owner references report the same `NotFound` as a missing account
/// so that foreign account ids are not distinguishable from absent ones.
///
/// # Errors
///
/// Returns [`AccountError::NotFound`] if the account does not exist or
/// belongs to a different owner.
pub fn validate_ownership<'a>(
    account: Option<&'a Account>,
    id: AccountId,
    owner_id: OwnerId,
) -> Result<&'a Account, AccountError> {
    match account {
        Some(a) if a.owner_id == owner_id => Ok(a),
        _ => Err(AccountError::NotFound(id)),
    }
}
