//! Document attachments and the document-requirement gate.
//!
//! Owners define document types, some marked required; transactions carry
//! attached documents. The gate computes whether a transaction's non-deleted
//! attachments satisfy the required-type policy, and feeds the workflow's
//! reconciliation check.

pub mod error;
pub mod gate;
pub mod types;

#[cfg(test)]
mod gate_props;

pub use error::DocumentError;
pub use gate::{gate_status, DocumentGateStatus};
pub use types::{Document, DocumentType};
