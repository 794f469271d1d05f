//! Summary aggregation service.
//!
//! Classification rules for a posted (non-draft) transaction:
//! - Legacy single-entry: amount >= 0 is income, amount < 0 is expense
//!   (absolute value).
//! - Double-entry: a credit to an income-class account is income; a debit
//!   to an income-class account reduces income (e.g. a refund); a debit to
//!   an expense-class account is an expense; a credit to an expense-class
//!   account reduces expenses. Other classes contribute to neither total.

use std::collections::HashMap;

use rust_decimal::Decimal;

use saldo_shared::types::{AccountId, TagId};

use super::types::{DailyPoint, DateRange, PeriodSummary, PeriodTotals, TagBucket};
use crate::accounts::types::AccountClass;
use crate::ledger::types::{Posting, Transaction};
use crate::workflow::types::TransactionStatus;

/// How many named tags appear in the breakdown before the remainder is
/// folded into "Other".
const TAG_BREAKDOWN_LIMIT: usize = 3;

/// A transaction's contribution to the period totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contribution {
    /// Income delta (may be negative for refunds).
    pub income: Decimal,
    /// Expense delta (may be negative for expense reductions).
    pub expense: Decimal,
}

impl Contribution {
    /// Net effect on the remaining total.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Magnitude used for tag ranking.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.net().abs()
    }
}

/// Summary aggregation service.
pub struct SummaryService;

impl SummaryService {
    /// Classifies one transaction's contribution to the totals.
    ///
    /// Returns `None` for drafts and split parents: drafts are excluded
    /// from all reporting, and a split parent is a display anchor whose
    /// activity is carried by its children.
    pub fn classify<C>(transaction: &Transaction, class_lookup: C) -> Option<Contribution>
    where
        C: Fn(AccountId) -> Option<AccountClass>,
    {
        if transaction.status == TransactionStatus::Draft || transaction.is_split_parent() {
            return None;
        }

        let mut contribution = Contribution::default();
        let amount = transaction.amount;

        match transaction.posting {
            Posting::Single { .. } => {
                if amount >= Decimal::ZERO {
                    contribution.income += amount;
                } else {
                    contribution.expense += -amount;
                }
            }
            _ => {
                if let Some(id) = transaction.posting.credit_account() {
                    match class_lookup(id) {
                        Some(AccountClass::Income) => contribution.income += amount,
                        Some(AccountClass::Expense) => contribution.expense -= amount,
                        _ => {}
                    }
                }
                if let Some(id) = transaction.posting.debit_account() {
                    match class_lookup(id) {
                        Some(AccountClass::Income) => contribution.income -= amount,
                        Some(AccountClass::Expense) => contribution.expense += amount,
                        _ => {}
                    }
                }
            }
        }

        Some(contribution)
    }

    /// Aggregates transactions into a period summary.
    ///
    /// Transactions outside the window are ignored except for the
    /// immediately-preceding equal-length window, which feeds the
    /// percentage change. When `account_filter` is set, only transactions
    /// touching that account (on the single, credit, or debit path) are
    /// included.
    pub fn summarize<C, T>(
        transactions: &[Transaction],
        range: DateRange,
        account_filter: Option<AccountId>,
        class_lookup: C,
        tag_name_lookup: T,
    ) -> PeriodSummary
    where
        C: Fn(AccountId) -> Option<AccountClass>,
        T: Fn(TagId) -> Option<String>,
    {
        let included = |t: &&Transaction| match account_filter {
            Some(id) => t.touches_account(id),
            None => true,
        };

        let mut totals = PeriodTotals::default();
        let mut previous_net = Decimal::ZERO;
        let mut by_day: HashMap<chrono::NaiveDate, Decimal> = HashMap::new();
        let mut by_tag: HashMap<TagId, Decimal> = HashMap::new();
        let mut untagged = Decimal::ZERO;

        let previous_range = range.previous();

        for transaction in transactions.iter().filter(included) {
            let Some(contribution) = Self::classify(transaction, &class_lookup) else {
                continue;
            };

            if previous_range.contains(transaction.date) {
                previous_net += contribution.net();
                continue;
            }
            if !range.contains(transaction.date) {
                continue;
            }

            totals.income += contribution.income;
            totals.expenses += contribution.expense;
            *by_day.entry(transaction.date).or_default() += contribution.net();

            let magnitude = contribution.magnitude();
            if transaction.tags.is_empty() {
                untagged += magnitude;
            } else {
                for tag in &transaction.tags {
                    *by_tag.entry(*tag).or_default() += magnitude;
                }
            }
        }

        totals.remaining = totals.income - totals.expenses;

        let change_percent = if previous_net.is_zero() {
            None
        } else {
            Some(
                (totals.remaining - previous_net) / previous_net.abs() * Decimal::ONE_HUNDRED,
            )
        };

        let tags = Self::tag_breakdown(by_tag, untagged, &tag_name_lookup);
        let daily = Self::daily_series(range, &by_day);

        PeriodSummary {
            range,
            totals,
            change_percent,
            tags,
            daily,
        }
    }

    /// Ranks tags by magnitude, keeping the top entries and folding the
    /// rest (plus untagged activity) into an "Other" bucket.
    fn tag_breakdown<T>(
        by_tag: HashMap<TagId, Decimal>,
        untagged: Decimal,
        tag_name_lookup: &T,
    ) -> Vec<TagBucket>
    where
        T: Fn(TagId) -> Option<String>,
    {
        let mut ranked: Vec<(String, Decimal)> = by_tag
            .into_iter()
            .map(|(id, amount)| {
                let name = tag_name_lookup(id).unwrap_or_else(|| id.to_string());
                (name, amount)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.abs().cmp(&a.1.abs()).then_with(|| a.0.cmp(&b.0)));

        let mut buckets: Vec<TagBucket> = ranked
            .iter()
            .take(TAG_BREAKDOWN_LIMIT)
            .map(|(name, amount)| TagBucket {
                name: name.clone(),
                amount: *amount,
            })
            .collect();

        let other: Decimal = ranked
            .iter()
            .skip(TAG_BREAKDOWN_LIMIT)
            .map(|(_, amount)| *amount)
            .sum::<Decimal>()
            + untagged;
        if !other.is_zero() {
            buckets.push(TagBucket {
                name: "Other".to_string(),
                amount: other,
            });
        }

        buckets
    }

    /// Produces one point per day in the window, zero-filling gaps.
    fn daily_series(
        range: DateRange,
        by_day: &HashMap<chrono::NaiveDate, Decimal>,
    ) -> Vec<DailyPoint> {
        range
            .start
            .iter_days()
            .take_while(|d| *d <= range.end)
            .map(|date| DailyPoint {
                date,
                amount: by_day.get(&date).copied().unwrap_or_default(),
            })
            .collect()
    }
}
