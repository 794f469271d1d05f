//! Workflow error types for status progression.

use thiserror::Error;

use crate::documents::gate::DocumentGateStatus;
use crate::ledger::error::LedgerError;

use super::types::TransactionStatus;

/// Errors that can occur while advancing a transaction's status.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The status has no successor.
    #[error("Transaction is already {0} and cannot be advanced")]
    Terminal(TransactionStatus),

    /// The stored status no longer matches what the caller saw.
    #[error("Transaction status changed: expected {expected}, found {actual}")]
    StatusMismatch {
        /// The status the caller based the advance on.
        expected: TransactionStatus,
        /// The status currently stored.
        actual: TransactionStatus,
    },

    /// Drafts are auto-submitted by policy; the manual advance is blocked.
    #[error("Drafts are submitted automatically; manual advance to pending is disabled")]
    AutoSubmitEnabled,

    /// The document-requirement gate blocked reconciliation.
    #[error("{}", .gate.requirement_message())]
    DocumentsRequired {
        /// The gate evaluation that blocked the advance.
        gate: DocumentGateStatus,
    },

    /// Re-validation of the transaction payload failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl WorkflowError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "STATUS_TERMINAL",
            Self::StatusMismatch { .. } => "STATUS_MISMATCH",
            Self::AutoSubmitEnabled => "AUTO_SUBMIT_ENABLED",
            Self::DocumentsRequired { .. } => "DOCUMENTS_REQUIRED",
            Self::Ledger(inner) => inner.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Terminal(_) | Self::AutoSubmitEnabled | Self::DocumentsRequired { .. } => 422,
            Self::StatusMismatch { .. } => 409,
            Self::Ledger(inner) => inner.http_status_code(),
        }
    }
}
