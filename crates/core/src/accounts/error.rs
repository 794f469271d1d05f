//! Account validation error types.

use thiserror::Error;

use saldo_shared::types::AccountId;

use super::types::{AccountDirection, EntryRole};

/// Errors raised when an account fails a typing or ownership check.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account is typed for one side of an entry but was used on the other.
    #[error("Account {account_id} is {direction}-only and cannot be used as a {role} account")]
    RoleMismatch {
        /// The offending account.
        account_id: AccountId,
        /// The account's directional typing.
        direction: AccountDirection,
        /// The role the account was used in.
        role: EntryRole,
    },

    /// Read-only accounts cannot be used in any entry.
    #[error("Account {0} is read-only and cannot be used in an entry")]
    ReadOnly(AccountId),

    /// Account does not exist or does not belong to the caller.
    #[error("Account not found: {0}")]
    NotFound(AccountId),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::RoleMismatch { .. } => "ACCOUNT_ROLE_MISMATCH",
            Self::ReadOnly(_) => "ACCOUNT_READ_ONLY",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::RoleMismatch { .. } | Self::ReadOnly(_) => 400,
            Self::NotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mismatch_message_names_account() {
        let id = AccountId::new();
        let err = AccountError::RoleMismatch {
            account_id: id,
            direction: AccountDirection::Debit,
            role: EntryRole::Credit,
        };
        let msg = err.to_string();
        assert!(msg.contains(&id.to_string()));
        assert!(msg.contains("debit-only"));
        assert!(msg.contains("credit account"));
        assert_eq!(err.error_code(), "ACCOUNT_ROLE_MISMATCH");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_not_found_is_404() {
        let err = AccountError::NotFound(AccountId::new());
        assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_read_only_code() {
        let err = AccountError::ReadOnly(AccountId::new());
        assert_eq!(err.error_code(), "ACCOUNT_READ_ONLY");
        assert_eq!(err.http_status_code(), 400);
    }
}
