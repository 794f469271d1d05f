//! The document-requirement gate.
//!
//! Read-only with respect to ledger state: the gate is recomputed from the
//! owner's document types and the transaction's non-deleted documents on
//! every read, and consumed by the workflow service when advancing into
//! the reconciled status.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use saldo_shared::types::TransactionId;

use super::types::{Document, DocumentType};

/// Result of evaluating the document requirement for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGateStatus {
    /// Distinct document types marked required for the owner.
    pub required_document_types: u32,
    /// Distinct required types present among the transaction's non-deleted
    /// documents.
    pub attached_required_types: u32,
    /// Policy: `0` means all required types are needed; `n > 0` means at
    /// least `min(n, required)` of them.
    pub min_required_documents: u32,
}

impl DocumentGateStatus {
    /// Returns true if the attached documents satisfy the required-type
    /// policy.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        if self.required_document_types == 0 {
            return true;
        }
        let needed = self.needed();
        self.attached_required_types >= needed
    }

    /// Number of distinct required types that must be attached.
    #[must_use]
    pub fn needed(&self) -> u32 {
        if self.min_required_documents == 0 {
            self.required_document_types
        } else {
            self.min_required_documents
                .min(self.required_document_types)
        }
    }

    /// Number of required types still missing.
    #[must_use]
    pub fn missing_count(&self) -> u32 {
        self.needed().saturating_sub(self.attached_required_types)
    }

    /// Human-readable description of the unmet (or met) requirement.
    #[must_use]
    pub fn requirement_message(&self) -> String {
        if self.min_required_documents == 0 {
            format!(
                "missing {} of {} required document types",
                self.missing_count(),
                self.required_document_types
            )
        } else {
            format!(
                "need at least {} of {} required document types",
                self.needed(),
                self.required_document_types
            )
        }
    }
}

/// Evaluates the gate for one transaction.
///
/// Counts distinct required types among the owner's document types, and
/// distinct required types represented by the transaction's non-deleted
/// documents.
#[must_use]
pub fn gate_status(
    document_types: &[DocumentType],
    documents: &[Document],
    transaction_id: TransactionId,
    min_required_documents: u32,
) -> DocumentGateStatus {
    let required: HashSet<_> = document_types
        .iter()
        .filter(|t| t.is_required)
        .map(|t| t.id)
        .collect();

    let attached: HashSet<_> = documents
        .iter()
        .filter(|d| d.transaction_id == transaction_id && !d.is_deleted)
        .map(|d| d.document_type_id)
        .filter(|id| required.contains(id))
        .collect();

    DocumentGateStatus {
        required_document_types: u32::try_from(required.len()).unwrap_or(u32::MAX),
        attached_required_types: u32::try_from(attached.len()).unwrap_or(u32::MAX),
        min_required_documents,
    }
}
