//! Document repository for attachment operations and the requirement gate.

use std::sync::Arc;

use tracing::debug;

use saldo_core::documents::error::DocumentError;
use saldo_core::documents::gate::{gate_status, DocumentGateStatus};
use saldo_core::documents::types::{Document, DocumentType};
use saldo_shared::types::{DocumentId, DocumentTypeId, OwnerId, TransactionId};

use crate::store::MemoryStore;

/// Repository for document types, attachments, and the requirement gate.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<MemoryStore>,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Defines a document type for the owner.
    pub async fn create_type(
        &self,
        owner_id: OwnerId,
        name: impl Into<String>,
        is_required: bool,
    ) -> DocumentType {
        let document_type = DocumentType {
            id: DocumentTypeId::new(),
            owner_id,
            name: name.into(),
            is_required,
        };
        let created = document_type.clone();
        self.store
            .write(|s| {
                s.document_types.insert(document_type.id, document_type);
            })
            .await;
        created
    }

    /// Attaches a document of the given type to a transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` or `TypeNotFound` when the referenced
    /// entities are missing or belong to another owner.
    pub async fn attach(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
        document_type_id: DocumentTypeId,
    ) -> Result<Document, DocumentError> {
        self.store
            .write(|s| {
                let owns_transaction = s
                    .transactions
                    .get(&transaction_id)
                    .is_some_and(|t| t.owner_id == owner_id);
                if !owns_transaction {
                    return Err(DocumentError::TransactionNotFound(transaction_id));
                }
                let owns_type = s
                    .document_types
                    .get(&document_type_id)
                    .is_some_and(|t| t.owner_id == owner_id);
                if !owns_type {
                    return Err(DocumentError::TypeNotFound(document_type_id));
                }

                let document = Document {
                    id: DocumentId::new(),
                    transaction_id,
                    document_type_id,
                    is_deleted: false,
                };
                s.documents.insert(document.id, document.clone());
                debug!(document_id = %document.id, %transaction_id, "document attached");
                Ok(document)
            })
            .await
    }

    /// Soft-deletes a document; it stops counting towards the gate but the
    /// row is retained.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when missing or attached to a foreign transaction.
    pub async fn remove(
        &self,
        owner_id: OwnerId,
        document_id: DocumentId,
    ) -> Result<(), DocumentError> {
        self.store
            .write(|s| {
                let owned = s.documents.get(&document_id).is_some_and(|d| {
                    s.transactions
                        .get(&d.transaction_id)
                        .is_some_and(|t| t.owner_id == owner_id)
                });
                if !owned {
                    return Err(DocumentError::NotFound(document_id));
                }
                if let Some(document) = s.documents.get_mut(&document_id) {
                    document.is_deleted = true;
                }
                Ok(())
            })
            .await
    }

    /// Evaluates the document-requirement gate for a transaction.
    ///
    /// Recomputed from live data on every call: the owner's required types
    /// and the transaction's non-deleted documents.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` when missing or foreign.
    pub async fn gate_status(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> Result<DocumentGateStatus, DocumentError> {
        self.store
            .read(|s| {
                let owns_transaction = s
                    .transactions
                    .get(&transaction_id)
                    .is_some_and(|t| t.owner_id == owner_id);
                if !owns_transaction {
                    return Err(DocumentError::TransactionNotFound(transaction_id));
                }

                let policy = s.policy(owner_id);
                let owner_types: Vec<_> = s
                    .document_types
                    .values()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect();
                let documents: Vec<_> = s.documents.values().cloned().collect();
                Ok(gate_status(
                    &owner_types,
                    &documents,
                    transaction_id,
                    policy.min_required_documents,
                ))
            })
            .await
    }
}
