//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;

use saldo_shared::error::AppError;
use saldo_shared::types::{CustomerId, TagId, TransactionId};

use crate::accounts::error::AccountError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Entry Shape Errors ==========
    /// Double-entry mode requires a full credit/debit pair on non-draft
    /// transactions.
    #[error("Double-entry mode requires both a credit and a debit account for non-draft transactions")]
    DoubleEntryRequired,

    /// Routed amounts carry their sign in the account roles and must be
    /// non-negative.
    #[error("Amount must be non-negative for double-entry postings, got {amount}")]
    NegativeAmount {
        /// The offending amount.
        amount: Decimal,
    },

    // ========== Split Errors ==========
    /// A split group needs at least two children.
    #[error("Split group must have at least 2 children, got {got}")]
    SplitTooFewChildren {
        /// Number of children supplied.
        got: usize,
    },

    /// Child debit and credit totals differ beyond tolerance.
    #[error(
        "Split group is unbalanced: debits {debit_total} != credits {credit_total} (difference {difference})"
    )]
    SplitImbalance {
        /// Sum of child amounts routed as debits.
        debit_total: Decimal,
        /// Sum of child amounts routed as credits.
        credit_total: Decimal,
        /// Absolute difference between the totals.
        difference: Decimal,
    },

    // ========== Reference Errors ==========
    /// Account typing, read-only, or ownership violation.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Referenced customer does not exist or belongs to another owner.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Referenced tag does not exist or belongs to another owner.
    #[error("Tag not found: {0}")]
    TagNotFound(TagId),

    /// Transaction does not exist or belongs to another owner.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DoubleEntryRequired => "DOUBLE_ENTRY_REQUIRED",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::SplitTooFewChildren { .. } => "SPLIT_TOO_FEW_CHILDREN",
            Self::SplitImbalance { .. } => "SPLIT_IMBALANCE",
            Self::Account(inner) => inner.error_code(),
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::TagNotFound(_) => "TAG_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::DoubleEntryRequired
            | Self::NegativeAmount { .. }
            | Self::SplitTooFewChildren { .. }
            | Self::SplitImbalance { .. } => 400,

            Self::Account(inner) => inner.http_status_code(),

            Self::CustomerNotFound(_) | Self::TagNotFound(_) | Self::TransactionNotFound(_) => 404,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            404 => Self::NotFound(message),
            _ => Self::Validation(message),
        }
    }
}
