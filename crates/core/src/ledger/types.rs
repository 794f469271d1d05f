//! Ledger domain types for transaction creation and validation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::{
    AccountId, CustomerId, OwnerId, SplitGroupId, TagId, TransactionId,
};

use crate::workflow::types::TransactionStatus;

/// How a transaction is routed to accounts.
///
/// Modeled as a sum type so a row cannot simultaneously carry a legacy
/// account and a double-entry pair. One-sided postings exist for split
/// children that route only one half of the pair; standalone non-draft
/// transactions must be a full [`Posting::Pair`] when double-entry mode is
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Posting {
    /// Legacy single-entry form; the amount may be signed.
    Single {
        /// The posting account.
        account_id: AccountId,
    },
    /// Credit side only.
    Credit {
        /// The credit account.
        credit_account_id: AccountId,
    },
    /// Debit side only.
    Debit {
        /// The debit account.
        debit_account_id: AccountId,
    },
    /// Full double-entry pair.
    Pair {
        /// The credit account.
        credit_account_id: AccountId,
        /// The debit account.
        debit_account_id: AccountId,
    },
}

impl Posting {
    /// Returns the credit-side account, if any.
    #[must_use]
    pub fn credit_account(&self) -> Option<AccountId> {
        match self {
            Self::Credit { credit_account_id } | Self::Pair { credit_account_id, .. } => {
                Some(*credit_account_id)
            }
            _ => None,
        }
    }

    /// Returns the debit-side account, if any.
    #[must_use]
    pub fn debit_account(&self) -> Option<AccountId> {
        match self {
            Self::Debit { debit_account_id } | Self::Pair { debit_account_id, .. } => {
                Some(*debit_account_id)
            }
            _ => None,
        }
    }

    /// Returns the legacy single account, if any.
    #[must_use]
    pub fn single_account(&self) -> Option<AccountId> {
        match self {
            Self::Single { account_id } => Some(*account_id),
            _ => None,
        }
    }

    /// Returns true for the full double-entry pair form.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair { .. })
    }

    /// Returns every account id referenced by this posting.
    #[must_use]
    pub fn referenced_accounts(&self) -> Vec<AccountId> {
        match self {
            Self::Single { account_id } => vec![*account_id],
            Self::Credit { credit_account_id } => vec![*credit_account_id],
            Self::Debit { debit_account_id } => vec![*debit_account_id],
            Self::Pair {
                credit_account_id,
                debit_account_id,
            } => vec![*credit_account_id, *debit_account_id],
        }
    }
}

/// Who the transaction was paid to or received from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payee {
    /// No payee recorded.
    #[default]
    None,
    /// Free-text payee name.
    Name(String),
    /// Link to a customer record.
    Customer(CustomerId),
}

/// Role of a transaction inside a split group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitRole {
    /// Aggregate display anchor; carries no independent posting semantics.
    Parent,
    /// Posting member of the group.
    Child,
}

/// Membership of a transaction in a split group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMembership {
    /// The shared group id.
    pub group_id: SplitGroupId,
    /// Parent or child.
    pub role: SplitRole,
}

/// Provider-supplied reference for idempotent sync imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    /// The sync provider (e.g. a bank or payment adapter name).
    pub provider: String,
    /// The provider's id for this transaction.
    pub external_id: String,
}

/// Input for creating or re-validating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// The transaction date.
    pub date: NaiveDate,
    /// Amount magnitude; sign rules depend on the posting form.
    pub amount: Decimal,
    /// Payee, if any.
    pub payee: Payee,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requested status.
    pub status: TransactionStatus,
    /// Account routing.
    pub posting: Posting,
    /// Tags for reporting breakdowns.
    pub tags: Vec<TagId>,
}

/// A persisted transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// The owning user.
    pub owner_id: OwnerId,
    /// The transaction date.
    pub date: NaiveDate,
    /// Amount magnitude; sign rules depend on the posting form.
    pub amount: Decimal,
    /// Payee, if any.
    pub payee: Payee,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Current status.
    pub status: TransactionStatus,
    /// When the status last changed.
    pub status_changed_at: DateTime<Utc>,
    /// Who last changed the status.
    pub status_changed_by: OwnerId,
    /// Account routing.
    pub posting: Posting,
    /// Split-group membership, if part of a split.
    pub split: Option<SplitMembership>,
    /// Tags for reporting breakdowns.
    pub tags: Vec<TagId>,
    /// Provider reference when imported by a sync adapter.
    pub external_ref: Option<ExternalRef>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns true if this row is a split parent (non-posting aggregate).
    #[must_use]
    pub fn is_split_parent(&self) -> bool {
        matches!(
            self.split,
            Some(SplitMembership {
                role: SplitRole::Parent,
                ..
            })
        )
    }

    /// Returns true if the transaction touches the given account on any of
    /// the single/credit/debit paths.
    #[must_use]
    pub fn touches_account(&self, account_id: AccountId) -> bool {
        self.posting.referenced_accounts().contains(&account_id)
    }
}
