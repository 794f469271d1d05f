//! Auxiliary owned entities referenced by transactions.

use serde::{Deserialize, Serialize};

use saldo_shared::types::{CustomerId, OwnerId, TagId};

/// A customer that can be linked as a transaction payee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// The owning user.
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
}

/// A tag used to break down reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier.
    pub id: TagId,
    /// The owning user.
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
}
