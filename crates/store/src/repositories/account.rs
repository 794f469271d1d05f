//! Account repository for chart-of-accounts operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use saldo_core::accounts::chart::has_invalid_config;
use saldo_core::accounts::error::AccountError;
use saldo_core::accounts::propagate::closed_ancestor_chain;
use saldo_core::accounts::types::{Account, AccountClass, AccountDirection};
use saldo_core::accounts::validate::validate_ownership;
use saldo_shared::types::{AccountId, OwnerId};

use crate::store::MemoryStore;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Hierarchical code; empty for accounts outside the hierarchy.
    pub code: String,
    /// Whether the account starts open.
    pub is_open: bool,
    /// Read-only accounts cannot be used in entries.
    pub is_read_only: bool,
    /// Directional typing constraint.
    pub direction: AccountDirection,
    /// Reporting classification.
    pub class: AccountClass,
    /// Opening balance.
    pub opening_balance: Decimal,
}

/// Field edits for an account; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    /// New display name.
    pub name: Option<String>,
    /// Direct open/closed edit. Closing never cascades to descendants.
    pub is_open: Option<bool>,
    /// Read-only flag edit.
    pub is_read_only: Option<bool>,
    /// Directional typing edit.
    pub direction: Option<AccountDirection>,
    /// Classification edit.
    pub class: Option<AccountClass>,
}

/// Repository for account operations.
#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<MemoryStore>,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Creates an account.
    pub async fn create(&self, owner_id: OwnerId, input: NewAccount) -> Account {
        let account = Account {
            id: AccountId::new(),
            owner_id,
            name: input.name,
            code: input.code,
            is_open: input.is_open,
            is_read_only: input.is_read_only,
            direction: input.direction,
            class: input.class,
            opening_balance: input.opening_balance,
        };
        let created = account.clone();
        self.store
            .write(|s| {
                s.accounts.insert(account.id, account);
            })
            .await;
        debug!(account_id = %created.id, code = %created.code, "account created");
        created
    }

    /// Fetches an account, rejecting cross-owner references.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if missing or foreign.
    pub async fn get(&self, owner_id: OwnerId, id: AccountId) -> Result<Account, AccountError> {
        self.store
            .read(|s| {
                validate_ownership(s.accounts.get(&id), id, owner_id).map(Clone::clone)
            })
            .await
    }

    /// Applies field edits to an account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if missing or foreign.
    pub async fn update(
        &self,
        owner_id: OwnerId,
        id: AccountId,
        patch: AccountPatch,
    ) -> Result<Account, AccountError> {
        self.store
            .write(|s| {
                validate_ownership(s.accounts.get(&id), id, owner_id)?;
                let account = s
                    .accounts
                    .get_mut(&id)
                    .ok_or(AccountError::NotFound(id))?;
                if let Some(name) = patch.name {
                    account.name = name;
                }
                if let Some(is_open) = patch.is_open {
                    account.is_open = is_open;
                }
                if let Some(is_read_only) = patch.is_read_only {
                    account.is_read_only = is_read_only;
                }
                if let Some(direction) = patch.direction {
                    account.direction = direction;
                }
                if let Some(class) = patch.class {
                    account.class = class;
                }
                Ok(account.clone())
            })
            .await
    }

    /// Lists the owner's accounts in display order (lexicographic by code).
    pub async fn list(&self, owner_id: OwnerId) -> Vec<Account> {
        self.store
            .read(|s| {
                let mut accounts = s.owner_accounts(owner_id);
                saldo_core::accounts::chart::display_order(&mut accounts);
                accounts
            })
            .await
    }

    /// Opens the account and every closed ancestor in one idempotent batch.
    ///
    /// Only ever transitions accounts closed → open, so racing callers are
    /// safe. Returns the ids that were actually opened; an empty result
    /// means the whole chain was already open.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if missing or foreign.
    pub async fn open_account_and_ancestors(
        &self,
        owner_id: OwnerId,
        id: AccountId,
    ) -> Result<Vec<AccountId>, AccountError> {
        self.store
            .write(|s| {
                let account = validate_ownership(s.accounts.get(&id), id, owner_id)?.clone();
                let all = s.owner_accounts(owner_id);
                let to_open = closed_ancestor_chain(&account, &all);
                for open_id in &to_open {
                    if let Some(a) = s.accounts.get_mut(open_id) {
                        a.is_open = true;
                    }
                }
                if !to_open.is_empty() {
                    debug!(
                        account_id = %id,
                        opened = to_open.len(),
                        "opened account chain"
                    );
                }
                Ok(to_open)
            })
            .await
    }

    /// Returns accounts flagged with an invalid configuration: open while
    /// at least one ancestor is closed.
    pub async fn invalid_configs(&self, owner_id: OwnerId) -> Vec<AccountId> {
        self.store
            .read(|s| {
                let all = s.owner_accounts(owner_id);
                all.iter()
                    .filter(|a| has_invalid_config(a, &all))
                    .map(|a| a.id)
                    .collect()
            })
            .await
    }
}
