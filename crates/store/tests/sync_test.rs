//! Integration tests for the idempotent sync import loop.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use saldo_core::accounts::types::{AccountClass, AccountDirection};
use saldo_core::ledger::types::{Payee, Posting, TransactionInput};
use saldo_core::workflow::types::TransactionStatus;
use saldo_shared::types::{AccountId, OwnerId, PageRequest};
use saldo_store::repositories::{
    AccountRepository, ExternalTransactionInput, NewAccount, SyncImporter, TransactionFilter,
    TransactionRepository,
};
use saldo_store::MemoryStore;

struct Fixture {
    accounts: AccountRepository,
    transactions: TransactionRepository,
    importer: SyncImporter,
    owner: OwnerId,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            accounts: AccountRepository::new(Arc::clone(&store)),
            transactions: TransactionRepository::new(Arc::clone(&store)),
            importer: SyncImporter::new(store),
            owner: OwnerId::new(),
        }
    }

    async fn add_account(&self, code: &str, is_read_only: bool) -> AccountId {
        self.accounts
            .create(
                self.owner,
                NewAccount {
                    name: format!("Account {code}"),
                    code: code.to_string(),
                    is_open: true,
                    is_read_only,
                    direction: AccountDirection::Neutral,
                    class: AccountClass::Asset,
                    opening_balance: Decimal::ZERO,
                },
            )
            .await
            .id
    }
}

fn row(external_id: &str, account: AccountId, amount: Decimal) -> ExternalTransactionInput {
    ExternalTransactionInput {
        external_id: external_id.to_string(),
        input: TransactionInput {
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            amount,
            payee: Payee::Name("ACME GmbH".to_string()),
            notes: None,
            status: TransactionStatus::Pending,
            posting: Posting::Single {
                account_id: account,
            },
            tags: vec![],
        },
    }
}

#[tokio::test]
async fn test_reimport_skips_existing_external_ids() {
    let fx = Fixture::new();
    let account = fx.add_account("1", false).await;

    let rows = vec![
        row("bank-001", account, dec!(100)),
        row("bank-002", account, dec!(200)),
    ];
    let outcome = fx.importer.import(fx.owner, "bank", rows.clone()).await;
    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.skipped, 0);
    assert!(outcome.errors.is_empty());

    // Re-running the same batch creates nothing new.
    let outcome = fx.importer.import(fx.owner, "bank", rows).await;
    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.skipped, 2);

    let page = fx
        .transactions
        .list(fx.owner, TransactionFilter::default(), PageRequest::default())
        .await;
    assert_eq!(page.meta.total, 2);
    for transaction in &page.data {
        let external = transaction.external_ref.as_ref().unwrap();
        assert_eq!(external.provider, "bank");
    }
}

#[tokio::test]
async fn test_same_external_id_different_provider_is_distinct() {
    let fx = Fixture::new();
    let account = fx.add_account("1", false).await;

    let outcome = fx
        .importer
        .import(fx.owner, "bank", vec![row("001", account, dec!(100))])
        .await;
    assert_eq!(outcome.created, 1);

    let outcome = fx
        .importer
        .import(fx.owner, "stripe", vec![row("001", account, dec!(100))])
        .await;
    assert_eq!(outcome.created, 1);
}

#[tokio::test]
async fn test_import_continues_past_invalid_rows() {
    let fx = Fixture::new();
    let good = fx.add_account("1", false).await;
    let read_only = fx.add_account("3", true).await;

    let rows = vec![
        row("bank-001", good, dec!(100)),
        row("bank-002", read_only, dec!(50)),
        row("bank-003", good, dec!(25)),
    ];
    let outcome = fx.importer.import(fx.owner, "bank", rows).await;

    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].external_id, "bank-002");
    assert_eq!(outcome.errors[0].error.status_code(), 400);

    // A later re-run retries only the failed row.
    let rows = vec![
        row("bank-001", good, dec!(100)),
        row("bank-002", good, dec!(50)),
        row("bank-003", good, dec!(25)),
    ];
    let outcome = fx.importer.import(fx.owner, "bank", rows).await;
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.skipped, 2);
    assert!(outcome.errors.is_empty());
}
