//! Transactional store and repositories for Saldo.
//!
//! The persistence layer is an in-process transactional store: every
//! repository operation validates first, then applies its mutations inside
//! a single write scope, so a transaction write and its accompanying
//! history-row append are atomic (both happen or neither does).
//!
//! # Modules
//!
//! - `store` - The in-memory store and its tables
//! - `entities` - Auxiliary owned entities (customers, tags)
//! - `repositories` - Operation contracts over the store

pub mod entities;
pub mod repositories;
pub mod store;

pub use store::MemoryStore;
