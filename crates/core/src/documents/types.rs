//! Document domain types.

use serde::{Deserialize, Serialize};

use saldo_shared::types::{DocumentId, DocumentTypeId, OwnerId, TransactionId};

/// A document type defined by the owner (e.g. receipt, invoice).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    /// Unique identifier.
    pub id: DocumentTypeId,
    /// The owning user.
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Required types participate in the reconciliation gate.
    pub is_required: bool,
}

/// A document attached to a transaction.
///
/// Documents are soft-deleted; deleted documents do not count towards the
/// requirement gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// The transaction this document is attached to.
    pub transaction_id: TransactionId,
    /// The document's type.
    pub document_type_id: DocumentTypeId,
    /// Soft-delete flag.
    pub is_deleted: bool,
}
