//! Property-based tests for LedgerService.
//!
//! - Split balance: accepted iff debit/credit totals agree within tolerance
//! - Entry shape: non-draft transactions under double-entry mode always
//!   carry a full pair after validation

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use saldo_shared::types::{AccountId, OwnerId};

use super::error::LedgerError;
use super::policy::LedgerPolicy;
use super::service::LedgerService;
use super::types::{Payee, Posting, TransactionInput};
use crate::accounts::types::{Account, AccountClass, AccountDirection};
use crate::workflow::types::TransactionStatus;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn neutral_account(owner: OwnerId, code: &str) -> Account {
    Account {
        id: AccountId::new(),
        owner_id: owner,
        name: format!("Account {code}"),
        code: code.to_string(),
        is_open: true,
        is_read_only: false,
        direction: AccountDirection::Neutral,
        class: AccountClass::Expense,
        opening_balance: Decimal::ZERO,
    }
}

fn make_input(posting: Posting, amount: Decimal) -> TransactionInput {
    TransactionInput {
        date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        amount,
        payee: Payee::None,
        notes: None,
        status: TransactionStatus::Draft,
        posting,
        tags: vec![],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* pair of child amounts, the split is accepted iff the
    /// debit-routed and credit-routed totals differ by at most 0.01.
    #[test]
    fn prop_split_balance_tolerance(
        debit_amount in positive_amount(),
        credit_amount in positive_amount(),
    ) {
        let owner = OwnerId::new();
        let bank = neutral_account(owner, "1");
        let expense = neutral_account(owner, "41");
        let accounts: HashMap<AccountId, Account> =
            [(bank.id, bank.clone()), (expense.id, expense.clone())].into();

        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let parent = make_input(Posting::Single { account_id: bank.id }, debit_amount);
        let children = vec![
            make_input(Posting::Debit { debit_account_id: expense.id }, debit_amount),
            make_input(Posting::Credit { credit_account_id: bank.id }, credit_amount),
        ];

        let result = LedgerService::validate_split(
            owner,
            &parent,
            &children,
            &policy,
            |id| accounts.get(&id).cloned(),
        );

        let within = (debit_amount - credit_amount).abs() <= Decimal::new(1, 2);
        if within {
            prop_assert!(result.is_ok(), "balanced split should be accepted");
        } else {
            prop_assert!(
                matches!(result, Err(LedgerError::SplitImbalance { .. })),
                "unbalanced split should be rejected"
            );
        }
    }

    /// *For any* amount and non-draft status, a one-sided or legacy posting
    /// is rejected under double-entry mode; a full pair is accepted.
    #[test]
    fn prop_non_draft_requires_pair(
        amount in positive_amount(),
        status_idx in 0usize..3,
    ) {
        let status = [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Reconciled,
        ][status_idx];

        let owner = OwnerId::new();
        let bank = neutral_account(owner, "1");
        let expense = neutral_account(owner, "41");
        let accounts: HashMap<AccountId, Account> =
            [(bank.id, bank.clone()), (expense.id, expense.clone())].into();
        let lookup = |id: AccountId| accounts.get(&id).cloned();

        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let mut single = make_input(Posting::Single { account_id: bank.id }, amount);
        single.status = status;
        prop_assert!(matches!(
            LedgerService::validate_transaction(owner, &single, &policy, lookup),
            Err(LedgerError::DoubleEntryRequired)
        ));

        let mut pair = make_input(
            Posting::Pair {
                credit_account_id: bank.id,
                debit_account_id: expense.id,
            },
            amount,
        );
        pair.status = status;
        prop_assert!(
            LedgerService::validate_transaction(owner, &pair, &policy, lookup).is_ok()
        );
    }

    /// *For any* negative amount, routed postings are rejected while the
    /// legacy single form keeps its sign.
    #[test]
    fn prop_sign_rules(amount in positive_amount()) {
        let owner = OwnerId::new();
        let bank = neutral_account(owner, "1");
        let expense = neutral_account(owner, "41");
        let accounts: HashMap<AccountId, Account> =
            [(bank.id, bank.clone()), (expense.id, expense.clone())].into();
        let lookup = |id: AccountId| accounts.get(&id).cloned();

        let negative = -amount;

        let pair = make_input(
            Posting::Pair {
                credit_account_id: bank.id,
                debit_account_id: expense.id,
            },
            negative,
        );
        let is_negative_amount = matches!(
            LedgerService::validate_transaction(owner, &pair, &LedgerPolicy::default(), lookup),
            Err(LedgerError::NegativeAmount { .. })
        );
        prop_assert!(is_negative_amount);

        let single = make_input(Posting::Single { account_id: bank.id }, negative);
        prop_assert!(
            LedgerService::validate_transaction(owner, &single, &LedgerPolicy::default(), lookup)
                .is_ok()
        );
    }
}
