//! Shared types and errors for Saldo.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error types

pub mod error;
pub mod types;

pub use error::{AppError, AppResult};
