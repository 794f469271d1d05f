//! In-memory transactional store.
//!
//! Tables live behind one `RwLock`; a repository operation takes the write
//! guard once, validates against the locked state, and applies all of its
//! mutations before releasing. That single-guard scope is what provides the
//! atomicity contract: a failed validation returns before any mutation, and
//! a transaction write plus its history append cannot be observed apart.

use std::collections::HashMap;

use tokio::sync::RwLock;

use saldo_core::accounts::types::Account;
use saldo_core::documents::types::{Document, DocumentType};
use saldo_core::ledger::policy::LedgerPolicy;
use saldo_core::ledger::types::Transaction;
use saldo_core::workflow::types::StatusHistoryRow;
use saldo_shared::types::{
    AccountId, CustomerId, DocumentId, DocumentTypeId, OwnerId, TagId, TransactionId,
};

use crate::entities::{Customer, Tag};

/// Key for the idempotent sync index: owner, provider, external id.
pub(crate) type ExternalKey = (OwnerId, String, String);

/// All store tables.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub accounts: HashMap<AccountId, Account>,
    pub transactions: HashMap<TransactionId, Transaction>,
    /// Append-only; insertion order is the tie-breaker for audit replay.
    pub history: Vec<StatusHistoryRow>,
    pub document_types: HashMap<DocumentTypeId, DocumentType>,
    pub documents: HashMap<DocumentId, Document>,
    pub customers: HashMap<CustomerId, Customer>,
    pub tags: HashMap<TagId, Tag>,
    pub policies: HashMap<OwnerId, LedgerPolicy>,
    pub external_refs: HashMap<ExternalKey, TransactionId>,
}

impl State {
    /// The owner's policy switches, defaulting when none were stored.
    pub fn policy(&self, owner_id: OwnerId) -> LedgerPolicy {
        self.policies.get(&owner_id).copied().unwrap_or_default()
    }

    /// Snapshot of the owner's accounts.
    pub fn owner_accounts(&self, owner_id: OwnerId) -> Vec<Account> {
        self.accounts
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect()
    }
}

/// The in-memory transactional store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure under the read guard.
    pub(crate) async fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Runs a mutating closure under the write guard.
    ///
    /// The closure must validate before mutating; everything it applies is
    /// visible to other callers only after it returns.
    pub(crate) async fn write<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    /// Stores the owner's policy switches.
    pub async fn set_policy(&self, owner_id: OwnerId, policy: LedgerPolicy) {
        self.write(|s| {
            s.policies.insert(owner_id, policy);
        })
        .await;
    }

    /// Reads the owner's policy switches.
    pub async fn policy(&self, owner_id: OwnerId) -> LedgerPolicy {
        self.read(|s| s.policy(owner_id)).await
    }

    /// Inserts a customer record.
    pub async fn insert_customer(&self, customer: Customer) {
        self.write(|s| {
            s.customers.insert(customer.id, customer);
        })
        .await;
    }

    /// Inserts a tag record.
    pub async fn insert_tag(&self, tag: Tag) {
        self.write(|s| {
            s.tags.insert(tag.id, tag);
        })
        .await;
    }
}
