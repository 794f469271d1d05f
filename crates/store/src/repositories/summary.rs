//! Summary repository: period aggregation over the owner's ledger.

use std::sync::Arc;

use saldo_core::summary::service::SummaryService;
use saldo_core::summary::types::{DateRange, PeriodSummary};
use saldo_shared::types::{AccountId, OwnerId};

use crate::store::MemoryStore;

/// Repository for reporting queries.
#[derive(Clone)]
pub struct SummaryRepository {
    store: Arc<MemoryStore>,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Aggregates the owner's transactions for the window: income and
    /// expense totals, net remaining, percentage change against the
    /// preceding equal-length window, tag breakdown, and a zero-filled
    /// daily series. Drafts and split parents never contribute.
    pub async fn period_summary(
        &self,
        owner_id: OwnerId,
        range: DateRange,
        account_filter: Option<AccountId>,
    ) -> PeriodSummary {
        self.store
            .read(|s| {
                let transactions: Vec<_> = s
                    .transactions
                    .values()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect();
                SummaryService::summarize(
                    &transactions,
                    range,
                    account_filter,
                    |id| s.accounts.get(&id).map(|a| a.class),
                    |id| s.tags.get(&id).map(|t| t.name.clone()),
                )
            })
            .await
    }
}
