//! Per-owner policy switches.
//!
//! Every policy flag is carried in an explicit value passed into core
//! operations rather than read from module state, so tests can vary policy
//! per call without touching anything shared.

use serde::{Deserialize, Serialize};

/// Policy switches read from the owner's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerPolicy {
    /// When enabled, non-draft transactions must carry a full
    /// credit/debit pair.
    pub double_entry_mode: bool,
    /// When enabled, drafts are promoted automatically and the manual
    /// draft-to-pending advance is blocked.
    pub auto_draft_to_pending: bool,
    /// Document-requirement condition for reconciliation: `0` means every
    /// required document type must be attached; `n > 0` means at least
    /// `min(n, required)` of them.
    pub min_required_documents: u32,
}
