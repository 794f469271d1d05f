//! Idempotent import loop for bank and payment sync adapters.
//!
//! Adapters produce `TransactionInput`-shaped payloads tagged with a
//! provider-supplied external id. Import is at-most-once per external id:
//! an existing match short-circuits to "skipped", not an error. Unlike
//! owner-authored bulk creation, the loop continues past single-row
//! failures and reports aggregate counts.

use std::sync::Arc;

use tracing::info;

use saldo_core::ledger::types::{ExternalRef, Transaction, TransactionInput};
use saldo_shared::error::AppError;
use saldo_shared::types::OwnerId;

use crate::repositories::transaction::TransactionRepository;
use crate::store::MemoryStore;

/// One provider record to import.
#[derive(Debug, Clone)]
pub struct ExternalTransactionInput {
    /// The provider's id for this transaction.
    pub external_id: String,
    /// The transaction payload.
    pub input: TransactionInput,
}

/// A single row that failed to import.
#[derive(Debug)]
pub struct ImportRowError {
    /// The provider's id for the failing row.
    pub external_id: String,
    /// Why the row was rejected.
    pub error: AppError,
}

/// Aggregate result of one import run.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Rows newly created.
    pub created: u32,
    /// Rows skipped because the external id was already imported.
    pub skipped: u32,
    /// Rows rejected by validation.
    pub errors: Vec<ImportRowError>,
}

/// Import loop shared by the bank and payment sync adapters.
#[derive(Clone)]
pub struct SyncImporter {
    store: Arc<MemoryStore>,
}

impl SyncImporter {
    /// Creates a new importer.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Imports provider records one at a time.
    ///
    /// Each record is checked against the external-reference index and
    /// created inside its own write scope, so re-running an interrupted
    /// import never duplicates rows.
    pub async fn import(
        &self,
        owner_id: OwnerId,
        provider: &str,
        rows: Vec<ExternalTransactionInput>,
    ) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        for row in rows {
            let key = (owner_id, provider.to_string(), row.external_id.clone());
            let external_ref = ExternalRef {
                provider: provider.to_string(),
                external_id: row.external_id.clone(),
            };

            let result = self
                .store
                .write(|s| -> Result<Option<Transaction>, AppError> {
                    if s.external_refs.contains_key(&key) {
                        return Ok(None);
                    }
                    let transaction = TransactionRepository::create_in(
                        s,
                        owner_id,
                        row.input,
                        Some(external_ref),
                    )?;
                    s.external_refs.insert(key, transaction.id);
                    Ok(Some(transaction))
                })
                .await;

            match result {
                Ok(Some(_)) => outcome.created += 1,
                Ok(None) => outcome.skipped += 1,
                Err(error) => outcome.errors.push(ImportRowError {
                    external_id: row.external_id,
                    error: AppError::from(error),
                }),
            }
        }

        info!(
            provider,
            created = outcome.created,
            skipped = outcome.skipped,
            errors = outcome.errors.len(),
            "sync import finished"
        );
        outcome
    }
}
