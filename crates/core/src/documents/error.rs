//! Document error types.

use thiserror::Error;

use saldo_shared::types::{DocumentId, DocumentTypeId, TransactionId};

/// Errors raised by document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document type does not exist or belongs to another owner.
    #[error("Document type not found: {0}")]
    TypeNotFound(DocumentTypeId),

    /// Document does not exist or belongs to another owner.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// Transaction to attach to does not exist or belongs to another owner.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
}

impl DocumentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TypeNotFound(_) => "DOCUMENT_TYPE_NOT_FOUND",
            Self::NotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        404
    }
}
