//! Summary report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of days in the window.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The immediately-preceding window of equal length.
    #[must_use]
    pub fn previous(&self) -> Self {
        let days = self.days();
        Self {
            start: self.start - chrono::Duration::days(days),
            end: self.start - chrono::Duration::days(1),
        }
    }
}

/// Income, expense, and remaining totals for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total income.
    pub income: Decimal,
    /// Total expenses.
    pub expenses: Decimal,
    /// Net remaining (income minus expenses).
    pub remaining: Decimal,
}

/// One tag's share of the period activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagBucket {
    /// Tag name, or `"Other"` for the remainder bucket.
    pub name: String,
    /// Aggregated magnitude for this tag.
    pub amount: Decimal,
}

/// Net activity for one day; gap days carry zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// The day.
    pub date: NaiveDate,
    /// Net amount for the day.
    pub amount: Decimal,
}

/// Aggregated summary for a date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The window aggregated.
    pub range: DateRange,
    /// Window totals.
    pub totals: PeriodTotals,
    /// Percentage change of `remaining` vs the preceding equal-length
    /// window; `None` when the preceding window nets to zero.
    pub change_percent: Option<Decimal>,
    /// Top tags by magnitude plus an `"Other"` bucket.
    pub tags: Vec<TagBucket>,
    /// Daily series with zero-filled gaps.
    pub daily: Vec<DailyPoint>,
}
