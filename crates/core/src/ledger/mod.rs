//! Transaction entity and balance validation.
//!
//! This module implements the posting side of the engine:
//! - Entry shapes (legacy single-account, double-entry pair, one-sided)
//! - Split groups (aggregate parent + balancing children)
//! - Policy switches read from per-owner settings
//! - The validation service gating every transaction write

pub mod error;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use policy::LedgerPolicy;
pub use service::LedgerService;
pub use types::{
    ExternalRef, Payee, Posting, SplitMembership, SplitRole, Transaction, TransactionInput,
};
