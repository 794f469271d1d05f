//! Period summary aggregation.
//!
//! Derives income/expense classification from account class and entry
//! direction, and aggregates non-draft transactions into period totals,
//! a tag breakdown, and a daily time series. Read-only: depends on the
//! ledger invariants but never changes state.

pub mod service;
pub mod types;

pub use service::SummaryService;
pub use types::{DailyPoint, DateRange, PeriodSummary, PeriodTotals, TagBucket};
