//! Ledger service for transaction validation.
//!
//! This service contains pure business logic with no database dependencies.
//! Persistence data is supplied through injected lookup closures; all
//! validation runs before any write, so a failure leaves nothing persisted.

use rust_decimal::Decimal;

use saldo_shared::types::{AccountId, OwnerId};

use super::error::LedgerError;
use super::policy::LedgerPolicy;
use super::types::{Posting, TransactionInput};
use crate::accounts::types::{Account, EntryRole};
use crate::accounts::validate::{validate_not_read_only, validate_ownership, validate_role};
use crate::workflow::types::TransactionStatus;

/// Child debit/credit totals may differ by at most this much.
fn split_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Ledger service for transaction validation.
pub struct LedgerService;

impl LedgerService {
    /// Validates a transaction payload against the entry-shape contract,
    /// the double-entry policy gate, and the account typing rules.
    ///
    /// Checks, in order:
    /// 1. Amount sign: routed postings (credit/debit sides) require a
    ///    non-negative amount; the legacy single form may carry a sign.
    /// 2. Double-entry requiredness: policy enabled and status != draft
    ///    means a full pair is mandatory.
    /// 3. Every referenced account: ownership, read-only, role typing.
    ///
    /// # Errors
    ///
    /// Returns the first violation found; the caller must not have written
    /// anything yet.
    pub fn validate_transaction<A>(
        owner_id: OwnerId,
        input: &TransactionInput,
        policy: &LedgerPolicy,
        account_lookup: A,
    ) -> Result<(), LedgerError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        if !matches!(input.posting, Posting::Single { .. }) && input.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount {
                amount: input.amount,
            });
        }

        if policy.double_entry_mode
            && input.status != TransactionStatus::Draft
            && !input.posting.is_pair()
        {
            return Err(LedgerError::DoubleEntryRequired);
        }

        if let Some(id) = input.posting.single_account() {
            let account = Self::resolve_account(id, owner_id, &account_lookup)?;
            validate_not_read_only(&account)?;
        }
        if let Some(id) = input.posting.credit_account() {
            let account = Self::resolve_account(id, owner_id, &account_lookup)?;
            validate_not_read_only(&account)?;
            validate_role(&account, EntryRole::Credit)?;
        }
        if let Some(id) = input.posting.debit_account() {
            let account = Self::resolve_account(id, owner_id, &account_lookup)?;
            validate_not_read_only(&account)?;
            validate_role(&account, EntryRole::Debit)?;
        }

        Ok(())
    }

    /// Validates a split group: an aggregate parent plus balancing children.
    ///
    /// The parent is a display anchor with no posting semantics of its own,
    /// so only its account references are resolved (ownership); typing
    /// rules are not applied to it. Each child must be a valid transaction
    /// in its own right, and in double-entry mode the child amounts routed
    /// as debits must balance those routed as credits within 0.01.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_split<A>(
        owner_id: OwnerId,
        parent: &TransactionInput,
        children: &[TransactionInput],
        policy: &LedgerPolicy,
        account_lookup: A,
    ) -> Result<(), LedgerError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        if children.len() < 2 {
            return Err(LedgerError::SplitTooFewChildren {
                got: children.len(),
            });
        }

        for id in parent.posting.referenced_accounts() {
            Self::resolve_account(id, owner_id, &account_lookup)?;
        }

        for child in children {
            Self::validate_transaction(owner_id, child, policy, &account_lookup)?;
        }

        if policy.double_entry_mode {
            let debit_total: Decimal = children
                .iter()
                .filter(|c| c.posting.debit_account().is_some())
                .map(|c| c.amount)
                .sum();
            let credit_total: Decimal = children
                .iter()
                .filter(|c| c.posting.credit_account().is_some())
                .map(|c| c.amount)
                .sum();

            let difference = (debit_total - credit_total).abs();
            if difference > split_tolerance() {
                return Err(LedgerError::SplitImbalance {
                    debit_total,
                    credit_total,
                    difference,
                });
            }
        }

        Ok(())
    }

    fn resolve_account<A>(
        id: AccountId,
        owner_id: OwnerId,
        account_lookup: &A,
    ) -> Result<Account, LedgerError>
    where
        A: Fn(AccountId) -> Option<Account>,
    {
        let account = account_lookup(id);
        let account = validate_ownership(account.as_ref(), id, owner_id)?;
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    use crate::accounts::error::AccountError;
    use crate::accounts::types::{AccountClass, AccountDirection};
    use crate::ledger::types::Payee;

    struct Fixture {
        owner: OwnerId,
        accounts: HashMap<AccountId, Account>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                owner: OwnerId::new(),
                accounts: HashMap::new(),
            }
        }

        fn add_account(
            &mut self,
            code: &str,
            direction: AccountDirection,
            is_read_only: bool,
        ) -> AccountId {
            let account = Account {
                id: AccountId::new(),
                owner_id: self.owner,
                name: format!("Account {code}"),
                code: code.to_string(),
                is_open: true,
                is_read_only,
                direction,
                class: AccountClass::Asset,
                opening_balance: Decimal::ZERO,
            };
            let id = account.id;
            self.accounts.insert(id, account);
            id
        }

        fn lookup(&self) -> impl Fn(AccountId) -> Option<Account> + '_ {
            |id| self.accounts.get(&id).cloned()
        }
    }

    fn make_input(posting: Posting, amount: Decimal, status: TransactionStatus) -> TransactionInput {
        TransactionInput {
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            amount,
            payee: Payee::None,
            notes: None,
            status,
            posting,
            tags: vec![],
        }
    }

    #[test]
    fn test_valid_pair_accepted() {
        let mut fx = Fixture::new();
        let credit = fx.add_account("2", AccountDirection::Neutral, false);
        let debit = fx.add_account("11", AccountDirection::Debit, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let input = make_input(
            Posting::Pair {
                credit_account_id: credit,
                debit_account_id: debit,
            },
            dec!(100),
            TransactionStatus::Pending,
        );

        let result = LedgerService::validate_transaction(fx.owner, &input, &policy, fx.lookup());
        assert!(result.is_ok());
    }

    #[test]
    fn test_negative_amount_rejected_for_pair() {
        let mut fx = Fixture::new();
        let credit = fx.add_account("2", AccountDirection::Neutral, false);
        let debit = fx.add_account("11", AccountDirection::Neutral, false);

        let input = make_input(
            Posting::Pair {
                credit_account_id: credit,
                debit_account_id: debit,
            },
            dec!(-5),
            TransactionStatus::Draft,
        );

        let result = LedgerService::validate_transaction(
            fx.owner,
            &input,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(matches!(result, Err(LedgerError::NegativeAmount { .. })));
    }

    #[test]
    fn test_signed_amount_allowed_for_legacy_single() {
        let mut fx = Fixture::new();
        let account = fx.add_account("1", AccountDirection::Neutral, false);

        let input = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(-250),
            TransactionStatus::Pending,
        );

        let result = LedgerService::validate_transaction(
            fx.owner,
            &input,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_double_entry_required_for_non_draft() {
        let mut fx = Fixture::new();
        let account = fx.add_account("1", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let input = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Pending,
        );

        let result = LedgerService::validate_transaction(fx.owner, &input, &policy, fx.lookup());
        assert!(matches!(result, Err(LedgerError::DoubleEntryRequired)));
    }

    #[test]
    fn test_missing_side_fails_when_double_entry_required() {
        let mut fx = Fixture::new();
        let debit = fx.add_account("11", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let input = make_input(
            Posting::Debit {
                debit_account_id: debit,
            },
            dec!(100),
            TransactionStatus::Completed,
        );

        let result = LedgerService::validate_transaction(fx.owner, &input, &policy, fx.lookup());
        assert!(matches!(result, Err(LedgerError::DoubleEntryRequired)));
    }

    #[test]
    fn test_draft_exempt_from_double_entry_gate() {
        let mut fx = Fixture::new();
        let account = fx.add_account("1", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let input = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Draft,
        );

        let result = LedgerService::validate_transaction(fx.owner, &input, &policy, fx.lookup());
        assert!(result.is_ok());
    }

    #[test]
    fn test_debit_only_account_rejected_as_credit() {
        let mut fx = Fixture::new();
        let credit = fx.add_account("11", AccountDirection::Debit, false);
        let debit = fx.add_account("2", AccountDirection::Neutral, false);

        let input = make_input(
            Posting::Pair {
                credit_account_id: credit,
                debit_account_id: debit,
            },
            dec!(100),
            TransactionStatus::Draft,
        );

        let result = LedgerService::validate_transaction(
            fx.owner,
            &input,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::Account(AccountError::RoleMismatch { .. }))
        ));
    }

    #[test]
    fn test_read_only_account_rejected_in_any_form() {
        let mut fx = Fixture::new();
        let account = fx.add_account("3", AccountDirection::Neutral, true);

        let input = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Draft,
        );

        let result = LedgerService::validate_transaction(
            fx.owner,
            &input,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::Account(AccountError::ReadOnly(_)))
        ));
    }

    #[test]
    fn test_cross_owner_account_rejected() {
        let mut fx = Fixture::new();
        let account = fx.add_account("1", AccountDirection::Neutral, false);

        let input = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Draft,
        );

        let other_owner = OwnerId::new();
        let result = LedgerService::validate_transaction(
            other_owner,
            &input,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::Account(AccountError::NotFound(_)))
        ));
    }

    #[test]
    fn test_split_requires_two_children() {
        let mut fx = Fixture::new();
        let account = fx.add_account("1", AccountDirection::Neutral, false);

        let parent = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Draft,
        );
        let child = make_input(
            Posting::Single {
                account_id: account,
            },
            dec!(100),
            TransactionStatus::Draft,
        );

        let result = LedgerService::validate_split(
            fx.owner,
            &parent,
            std::slice::from_ref(&child),
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::SplitTooFewChildren { got: 1 })
        ));
    }

    #[test]
    fn test_split_balance_enforced_in_double_entry_mode() {
        let mut fx = Fixture::new();
        let bank = fx.add_account("1", AccountDirection::Neutral, false);
        let expense_a = fx.add_account("41", AccountDirection::Neutral, false);
        let expense_b = fx.add_account("42", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let parent = make_input(
            Posting::Single { account_id: bank },
            dec!(100),
            TransactionStatus::Draft,
        );
        let children = vec![
            make_input(
                Posting::Debit {
                    debit_account_id: expense_a,
                },
                dec!(60),
                TransactionStatus::Draft,
            ),
            make_input(
                Posting::Credit {
                    credit_account_id: expense_b,
                },
                dec!(40),
                TransactionStatus::Draft,
            ),
        ];

        let result =
            LedgerService::validate_split(fx.owner, &parent, &children, &policy, fx.lookup());
        assert!(matches!(
            result,
            Err(LedgerError::SplitImbalance { debit_total, credit_total, .. })
                if debit_total == dec!(60) && credit_total == dec!(40)
        ));
    }

    #[test]
    fn test_split_balance_within_tolerance_accepted() {
        let mut fx = Fixture::new();
        let expense = fx.add_account("41", AccountDirection::Neutral, false);
        let bank = fx.add_account("1", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let parent = make_input(
            Posting::Single { account_id: bank },
            dec!(100),
            TransactionStatus::Draft,
        );
        let children = vec![
            make_input(
                Posting::Debit {
                    debit_account_id: expense,
                },
                dec!(100.00),
                TransactionStatus::Draft,
            ),
            make_input(
                Posting::Credit {
                    credit_account_id: bank,
                },
                dec!(99.99),
                TransactionStatus::Draft,
            ),
        ];

        let result =
            LedgerService::validate_split(fx.owner, &parent, &children, &policy, fx.lookup());
        assert!(result.is_ok());
    }

    #[test]
    fn test_split_pair_children_always_balance() {
        let mut fx = Fixture::new();
        let bank = fx.add_account("1", AccountDirection::Neutral, false);
        let expense = fx.add_account("41", AccountDirection::Neutral, false);
        let policy = LedgerPolicy {
            double_entry_mode: true,
            ..LedgerPolicy::default()
        };

        let parent = make_input(
            Posting::Single { account_id: bank },
            dec!(100),
            TransactionStatus::Draft,
        );
        let children = vec![
            make_input(
                Posting::Pair {
                    credit_account_id: bank,
                    debit_account_id: expense,
                },
                dec!(60),
                TransactionStatus::Draft,
            ),
            make_input(
                Posting::Pair {
                    credit_account_id: bank,
                    debit_account_id: expense,
                },
                dec!(40),
                TransactionStatus::Draft,
            ),
        ];

        let result =
            LedgerService::validate_split(fx.owner, &parent, &children, &policy, fx.lookup());
        assert!(result.is_ok());
    }

    #[test]
    fn test_split_balance_not_checked_without_double_entry() {
        let mut fx = Fixture::new();
        let bank = fx.add_account("1", AccountDirection::Neutral, false);
        let expense = fx.add_account("41", AccountDirection::Neutral, false);

        let parent = make_input(
            Posting::Single { account_id: bank },
            dec!(100),
            TransactionStatus::Draft,
        );
        let children = vec![
            make_input(
                Posting::Debit {
                    debit_account_id: expense,
                },
                dec!(60),
                TransactionStatus::Draft,
            ),
            make_input(
                Posting::Debit {
                    debit_account_id: expense,
                },
                dec!(40),
                TransactionStatus::Draft,
            ),
        ];

        let result = LedgerService::validate_split(
            fx.owner,
            &parent,
            &children,
            &LedgerPolicy::default(),
            fx.lookup(),
        );
        assert!(result.is_ok());
    }
}
