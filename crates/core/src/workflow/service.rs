//! Workflow service for status transitions.
//!
//! Implements the gate policy for the advance operation. All methods are
//! associated functions on a stateless service; the store persists the
//! returned transition together with its history row.

use chrono::Utc;

use saldo_shared::types::OwnerId;

use super::error::WorkflowError;
use super::types::{StatusTransition, TransactionStatus};
use crate::documents::gate::DocumentGateStatus;
use crate::ledger::policy::LedgerPolicy;

/// Stateless service for validating status advancement.
pub struct WorkflowService;

impl WorkflowService {
    /// Validates a single-step advance from `current` and returns the
    /// transition to persist.
    ///
    /// Gates, in order:
    /// 1. `current` must have a successor (Reconciled is terminal).
    /// 2. When auto-submit is enabled the manual draft→pending advance is
    ///    blocked (drafts are promoted by the system instead).
    /// 3. Advancing into Reconciled requires the document gate to pass
    ///    whenever the owner has required document types at all.
    ///
    /// The caller must additionally re-validate the full transaction
    /// payload through the ledger service before persisting.
    ///
    /// # Errors
    ///
    /// Returns the first failing gate; nothing may be persisted on error.
    pub fn advance(
        current: TransactionStatus,
        policy: &LedgerPolicy,
        gate: &DocumentGateStatus,
        changed_by: OwnerId,
    ) -> Result<StatusTransition, WorkflowError> {
        let Some(next) = current.next() else {
            return Err(WorkflowError::Terminal(current));
        };

        if policy.auto_draft_to_pending
            && current == TransactionStatus::Draft
            && next == TransactionStatus::Pending
        {
            return Err(WorkflowError::AutoSubmitEnabled);
        }

        if next == TransactionStatus::Reconciled
            && gate.required_document_types > 0
            && !gate.is_satisfied()
        {
            return Err(WorkflowError::DocumentsRequired { gate: *gate });
        }

        Ok(StatusTransition {
            from: current,
            to: next,
            changed_by,
            changed_at: Utc::now(),
        })
    }
}
