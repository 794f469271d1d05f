//! Workflow domain types for transaction lifecycle management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use saldo_shared::types::{OwnerId, TransactionId};

/// Transaction status in the ledger lifecycle.
///
/// Statuses progress linearly:
/// Draft → Pending → Completed → Reconciled.
/// The advance operation moves exactly one step and never reverts;
/// Reconciled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is being drafted and is excluded from reporting.
    Draft,
    /// Transaction has been submitted and posts to the ledger.
    Pending,
    /// Transaction has cleared.
    Completed,
    /// Transaction has been reconciled (terminal).
    Reconciled,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Reconciled => "reconciled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "reconciled" => Some(Self::Reconciled),
            _ => None,
        }
    }

    /// Returns true if the status has a successor.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !matches!(self, Self::Reconciled)
    }

    /// Returns the next status in the linear progression.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Pending),
            Self::Pending => Some(Self::Completed),
            Self::Completed => Some(Self::Reconciled),
            Self::Reconciled => None,
        }
    }

    /// Returns true for the terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reconciled)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated status transition with audit data.
///
/// Produced by [`super::service::WorkflowService::advance`]; the store
/// persists the new status and the matching history row together.
#[derive(Debug, Clone)]
pub struct StatusTransition {
    /// The status before the transition.
    pub from: TransactionStatus,
    /// The status after the transition.
    pub to: TransactionStatus,
    /// The user making the change.
    pub changed_by: OwnerId,
    /// When the change was made.
    pub changed_at: DateTime<Utc>,
}

/// One append-only audit row per status-affecting write.
///
/// `from_status` is `None` for the row recorded at creation. Rows are never
/// mutated or deleted; ordering is by `changed_at` with ties broken by
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryRow {
    /// The transaction this row describes.
    pub transaction_id: TransactionId,
    /// Previous status; `None` on creation.
    pub from_status: Option<TransactionStatus>,
    /// New status.
    pub to_status: TransactionStatus,
    /// The user who made the change.
    pub changed_by: OwnerId,
    /// When the change was made.
    pub changed_at: DateTime<Utc>,
    /// Optional note (e.g. marks direct status edits).
    pub notes: Option<String>,
}
