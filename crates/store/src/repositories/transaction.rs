//! Transaction repository for ledger transaction operations.
//!
//! Every mutating operation validates before writing, inside a single store
//! write scope: on failure zero rows are written, including zero history
//! rows. Every write that changes a transaction's status appends exactly
//! one history row.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use saldo_core::accounts::propagate::closed_ancestor_chain;
use saldo_core::ledger::error::LedgerError;
use saldo_core::ledger::service::LedgerService;
use saldo_core::ledger::types::{
    ExternalRef, Payee, Posting, SplitMembership, SplitRole, Transaction, TransactionInput,
};
use saldo_core::workflow::error::WorkflowError;
use saldo_core::workflow::service::WorkflowService;
use saldo_core::workflow::types::{StatusHistoryRow, TransactionStatus};
use saldo_shared::types::{
    AccountId, OwnerId, SplitGroupId, TagId, TransactionId,
};

use crate::store::{MemoryStore, State};

/// Field edits for a transaction; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    /// New transaction date.
    pub date: Option<NaiveDate>,
    /// New amount.
    pub amount: Option<rust_decimal::Decimal>,
    /// New payee.
    pub payee: Option<Payee>,
    /// New notes.
    pub notes: Option<Option<String>>,
    /// New posting routing.
    pub posting: Option<Posting>,
    /// New tag set.
    pub tags: Option<Vec<TagId>>,
    /// Direct status assignment. Bypasses the advance gates; the change is
    /// still stamped and logged to history.
    pub status: Option<TransactionStatus>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Only transactions touching this account.
    pub account_id: Option<AccountId>,
}

/// Repository for transaction operations.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Arc<MemoryStore>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Creates a transaction.
    ///
    /// Validates the payload, opens every referenced account (and closed
    /// ancestors), inserts the row, and appends the initial history row
    /// (`from_status: None`) — all atomically.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is written on error.
    pub async fn create(
        &self,
        owner_id: OwnerId,
        input: TransactionInput,
    ) -> Result<Transaction, LedgerError> {
        self.store
            .write(|s| Self::create_in(s, owner_id, input, None))
            .await
    }

    /// Creates several transactions, all-or-nothing.
    ///
    /// Every row is validated before any row is inserted, so one invalid
    /// row rejects the entire batch with an error identifying the cause.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is written on error.
    pub async fn bulk_create(
        &self,
        owner_id: OwnerId,
        inputs: Vec<TransactionInput>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.store
            .write(|s| {
                let policy = s.policy(owner_id);
                for input in &inputs {
                    Self::validate_refs(s, owner_id, input, &policy)?;
                }
                let created = inputs
                    .into_iter()
                    .map(|input| Self::insert(s, owner_id, input, None, None))
                    .collect();
                Ok(created)
            })
            .await
    }

    /// Creates a split group: an aggregate parent plus balancing children,
    /// atomically, under a fresh shared group id.
    ///
    /// The parent row is inserted before its children so no child ever
    /// references a group without its parent. Every created row gets one
    /// initial history row.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is written on error.
    pub async fn create_split(
        &self,
        owner_id: OwnerId,
        parent_input: TransactionInput,
        child_inputs: Vec<TransactionInput>,
    ) -> Result<(Transaction, Vec<Transaction>), LedgerError> {
        self.store
            .write(|s| {
                let policy = s.policy(owner_id);
                {
                    let lookup = |id: AccountId| s.accounts.get(&id).cloned();
                    LedgerService::validate_split(
                        owner_id,
                        &parent_input,
                        &child_inputs,
                        &policy,
                        lookup,
                    )?;
                }
                Self::validate_aux_refs(s, owner_id, &parent_input)?;
                for child in &child_inputs {
                    Self::validate_aux_refs(s, owner_id, child)?;
                }

                let group_id = SplitGroupId::new();
                let parent = Self::insert(
                    s,
                    owner_id,
                    parent_input,
                    None,
                    Some(SplitMembership {
                        group_id,
                        role: SplitRole::Parent,
                    }),
                );

                let children: Vec<Transaction> = child_inputs
                    .into_iter()
                    .map(|input| {
                        Self::insert(
                            s,
                            owner_id,
                            input,
                            None,
                            Some(SplitMembership {
                                group_id,
                                role: SplitRole::Child,
                            }),
                        )
                    })
                    .collect();

                debug!(%group_id, children = children.len(), "split group created");
                Ok((parent, children))
            })
            .await
    }

    /// Fetches a transaction, rejecting cross-owner references.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if missing or foreign.
    pub async fn get(
        &self,
        owner_id: OwnerId,
        id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        self.store.read(|s| Self::get_owned(s, owner_id, id)).await
    }

    /// Applies field edits to a transaction and re-validates the result.
    ///
    /// A direct `status` assignment through this path bypasses the linear
    /// advance gates on purpose (it may move backwards or skip steps), but
    /// it is never silent: the change stamps `status_changed_at`/`by` and
    /// appends exactly one history row noting the direct edit.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is written on error.
    pub async fn update(
        &self,
        owner_id: OwnerId,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<Transaction, LedgerError> {
        self.store
            .write(|s| {
                let mut updated = Self::get_owned(s, owner_id, id)?;
                let previous_status = updated.status;

                if let Some(date) = patch.date {
                    updated.date = date;
                }
                if let Some(amount) = patch.amount {
                    updated.amount = amount;
                }
                if let Some(payee) = patch.payee {
                    updated.payee = payee;
                }
                if let Some(notes) = patch.notes {
                    updated.notes = notes;
                }
                if let Some(posting) = patch.posting {
                    updated.posting = posting;
                }
                if let Some(tags) = patch.tags {
                    updated.tags = tags;
                }
                if let Some(status) = patch.status {
                    updated.status = status;
                }

                let policy = s.policy(owner_id);
                let input = Self::as_input(&updated);
                {
                    let lookup = |aid: AccountId| s.accounts.get(&aid).cloned();
                    LedgerService::validate_transaction(owner_id, &input, &policy, lookup)?;
                }
                Self::validate_aux_refs(s, owner_id, &input)?;

                if updated.status != previous_status {
                    let now = Utc::now();
                    updated.status_changed_at = now;
                    updated.status_changed_by = owner_id;
                    s.history.push(StatusHistoryRow {
                        transaction_id: id,
                        from_status: Some(previous_status),
                        to_status: updated.status,
                        changed_by: owner_id,
                        changed_at: now,
                        notes: Some("direct status edit".to_string()),
                    });
                    warn!(
                        transaction_id = %id,
                        from = %previous_status,
                        to = %updated.status,
                        "status set directly, bypassing advance gates"
                    );
                }

                s.transactions.insert(id, updated.clone());
                Ok(updated)
            })
            .await
    }

    /// Deletes a transaction after verifying ownership across the
    /// single/credit/debit account paths. History rows are retained.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if missing or foreign.
    pub async fn delete(
        &self,
        owner_id: OwnerId,
        id: TransactionId,
    ) -> Result<TransactionId, LedgerError> {
        self.store
            .write(|s| {
                let transaction = Self::get_owned(s, owner_id, id)?;
                let foreign_path = transaction
                    .posting
                    .referenced_accounts()
                    .iter()
                    .any(|aid| {
                        s.accounts
                            .get(aid)
                            .is_none_or(|a| a.owner_id != owner_id)
                    });
                if foreign_path {
                    return Err(LedgerError::TransactionNotFound(id));
                }
                s.transactions.remove(&id);
                debug!(transaction_id = %id, "transaction deleted");
                Ok(id)
            })
            .await
    }

    /// Advances the transaction one step through the status machine.
    ///
    /// The stored status must still equal `current_status`; the document
    /// gate is recomputed from live documents; the full payload is
    /// re-validated as if re-submitted with the target status. On success
    /// the new status is persisted together with exactly one history row.
    ///
    /// # Errors
    ///
    /// Returns the first failing gate; nothing is written on error.
    pub async fn advance_status(
        &self,
        owner_id: OwnerId,
        id: TransactionId,
        current_status: TransactionStatus,
    ) -> Result<Transaction, WorkflowError> {
        self.store
            .write(|s| {
                let mut transaction = Self::get_owned(s, owner_id, id)?;
                if transaction.status != current_status {
                    return Err(WorkflowError::StatusMismatch {
                        expected: current_status,
                        actual: transaction.status,
                    });
                }

                let policy = s.policy(owner_id);
                let owner_types: Vec<_> = s
                    .document_types
                    .values()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect();
                let documents: Vec<_> = s.documents.values().cloned().collect();
                let gate = saldo_core::documents::gate::gate_status(
                    &owner_types,
                    &documents,
                    id,
                    policy.min_required_documents,
                );

                let transition =
                    WorkflowService::advance(transaction.status, &policy, &gate, owner_id)?;

                let mut input = Self::as_input(&transaction);
                input.status = transition.to;
                {
                    let lookup = |aid: AccountId| s.accounts.get(&aid).cloned();
                    LedgerService::validate_transaction(owner_id, &input, &policy, lookup)?;
                }

                transaction.status = transition.to;
                transaction.status_changed_at = transition.changed_at;
                transaction.status_changed_by = transition.changed_by;
                s.history.push(StatusHistoryRow {
                    transaction_id: id,
                    from_status: Some(transition.from),
                    to_status: transition.to,
                    changed_by: transition.changed_by,
                    changed_at: transition.changed_at,
                    notes: None,
                });
                s.transactions.insert(id, transaction.clone());

                debug!(
                    transaction_id = %id,
                    from = %transition.from,
                    to = %transition.to,
                    "status advanced"
                );
                Ok(transaction)
            })
            .await
    }

    /// Returns the transaction's status history, ordered by change time
    /// with ties broken by insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if missing or foreign.
    pub async fn status_history(
        &self,
        owner_id: OwnerId,
        id: TransactionId,
    ) -> Result<Vec<StatusHistoryRow>, LedgerError> {
        self.store
            .read(|s| {
                Self::get_owned(s, owner_id, id)?;
                let mut rows: Vec<StatusHistoryRow> = s
                    .history
                    .iter()
                    .filter(|row| row.transaction_id == id)
                    .cloned()
                    .collect();
                rows.sort_by_key(|row| row.changed_at);
                Ok(rows)
            })
            .await
    }

    /// Lists the owner's transactions, newest first, with pagination.
    pub async fn list(
        &self,
        owner_id: OwnerId,
        filter: TransactionFilter,
        page: saldo_shared::types::PageRequest,
    ) -> saldo_shared::types::PageResponse<Transaction> {
        self.store
            .read(|s| {
                let mut rows: Vec<Transaction> = s
                    .transactions
                    .values()
                    .filter(|t| t.owner_id == owner_id)
                    .filter(|t| filter.status.is_none_or(|status| t.status == status))
                    .filter(|t| filter.date_from.is_none_or(|from| t.date >= from))
                    .filter(|t| filter.date_to.is_none_or(|to| t.date <= to))
                    .filter(|t| {
                        filter
                            .account_id
                            .is_none_or(|account| t.touches_account(account))
                    })
                    .cloned()
                    .collect();
                rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

                let total = rows.len() as u64;
                let data: Vec<Transaction> = rows
                    .into_iter()
                    .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                    .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                    .collect();
                saldo_shared::types::PageResponse::new(data, page.page, page.per_page, total)
            })
            .await
    }

    // ========== internals ==========

    /// Creation pipeline shared with the sync importer: validate, auto-open
    /// referenced accounts, insert, append the initial history row.
    pub(crate) fn create_in(
        state: &mut State,
        owner_id: OwnerId,
        input: TransactionInput,
        external_ref: Option<ExternalRef>,
    ) -> Result<Transaction, LedgerError> {
        let policy = state.policy(owner_id);
        Self::validate_refs(state, owner_id, &input, &policy)?;
        Ok(Self::insert(state, owner_id, input, external_ref, None))
    }

    /// Full reference validation: entry shape, account typing, customer
    /// and tag ownership.
    fn validate_refs(
        state: &State,
        owner_id: OwnerId,
        input: &TransactionInput,
        policy: &saldo_core::ledger::policy::LedgerPolicy,
    ) -> Result<(), LedgerError> {
        let lookup = |id: AccountId| state.accounts.get(&id).cloned();
        LedgerService::validate_transaction(owner_id, input, policy, lookup)?;
        Self::validate_aux_refs(state, owner_id, input)
    }

    /// Customer and tag references must exist and belong to the owner.
    fn validate_aux_refs(
        state: &State,
        owner_id: OwnerId,
        input: &TransactionInput,
    ) -> Result<(), LedgerError> {
        if let Payee::Customer(customer_id) = input.payee {
            let owned = state
                .customers
                .get(&customer_id)
                .is_some_and(|c| c.owner_id == owner_id);
            if !owned {
                return Err(LedgerError::CustomerNotFound(customer_id));
            }
        }
        for tag_id in &input.tags {
            let owned = state
                .tags
                .get(tag_id)
                .is_some_and(|t| t.owner_id == owner_id);
            if !owned {
                return Err(LedgerError::TagNotFound(*tag_id));
            }
        }
        Ok(())
    }

    /// Inserts the row: auto-open step, transaction row, initial history.
    /// Validation must already have passed.
    fn insert(
        state: &mut State,
        owner_id: OwnerId,
        input: TransactionInput,
        external_ref: Option<ExternalRef>,
        split: Option<SplitMembership>,
    ) -> Transaction {
        Self::auto_open(state, owner_id, &input.posting);

        let now = Utc::now();
        let transaction = Transaction {
            id: TransactionId::new(),
            owner_id,
            date: input.date,
            amount: input.amount,
            payee: input.payee,
            notes: input.notes,
            status: input.status,
            status_changed_at: now,
            status_changed_by: owner_id,
            posting: input.posting,
            split,
            tags: input.tags,
            external_ref,
            created_at: now,
        };

        state.history.push(StatusHistoryRow {
            transaction_id: transaction.id,
            from_status: None,
            to_status: transaction.status,
            changed_by: owner_id,
            changed_at: now,
            notes: None,
        });
        state
            .transactions
            .insert(transaction.id, transaction.clone());
        transaction
    }

    /// Opens every referenced account and its closed ancestors. Idempotent:
    /// only closed accounts transition, and only towards open.
    fn auto_open(state: &mut State, owner_id: OwnerId, posting: &Posting) {
        let all = state.owner_accounts(owner_id);
        let mut to_open = Vec::new();
        for id in posting.referenced_accounts() {
            if let Some(account) = state.accounts.get(&id) {
                to_open.extend(closed_ancestor_chain(account, &all));
            }
        }
        let opened = to_open.len();
        for id in to_open {
            if let Some(account) = state.accounts.get_mut(&id) {
                account.is_open = true;
            }
        }
        if opened > 0 {
            debug!(opened, "auto-opened referenced account chain");
        }
    }

    fn get_owned(
        state: &State,
        owner_id: OwnerId,
        id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        state
            .transactions
            .get(&id)
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// Re-builds the validation input from a stored transaction.
    fn as_input(transaction: &Transaction) -> TransactionInput {
        TransactionInput {
            date: transaction.date,
            amount: transaction.amount,
            payee: transaction.payee.clone(),
            notes: transaction.notes.clone(),
            status: transaction.status,
            posting: transaction.posting,
            tags: transaction.tags.clone(),
        }
    }
}
