//! Repositories implementing the operation contracts over the store.

pub mod account;
pub mod document;
pub mod summary;
pub mod sync;
pub mod transaction;

pub use account::{AccountPatch, AccountRepository, NewAccount};
pub use document::DocumentRepository;
pub use summary::SummaryRepository;
pub use sync::{ExternalTransactionInput, ImportOutcome, ImportRowError, SyncImporter};
pub use transaction::{TransactionFilter, TransactionPatch, TransactionRepository};
