//! Chart-of-accounts logic.
//!
//! This module implements the account side of the engine:
//! - Account domain types (direction, class)
//! - Hierarchical chart-of-accounts contract (prefix codes)
//! - Account typing and ownership validation
//! - Auto-open propagation for referenced accounts

pub mod chart;
pub mod error;
pub mod propagate;
pub mod types;
pub mod validate;

#[cfg(test)]
mod chart_props;

pub use chart::{
    ancestors_of, children_of, display_order, has_children, has_invalid_config, is_visible,
};
pub use error::AccountError;
pub use propagate::closed_ancestor_chain;
pub use types::{Account, AccountClass, AccountDirection, EntryRole};
pub use validate::{validate_not_read_only, validate_ownership, validate_role};
