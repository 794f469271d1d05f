//! Account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use saldo_shared::types::{AccountId, OwnerId};

/// Directional typing of an account.
///
/// Constrains which side of a double-entry pair the account may appear on:
/// a debit-only account can never be the credit side of an entry, and vice
/// versa. Neutral accounts may appear on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountDirection {
    /// Account may only be used on the credit side.
    Credit,
    /// Account may only be used on the debit side.
    Debit,
    /// Account may be used on either side.
    Neutral,
}

impl AccountDirection {
    /// Returns the string representation of the direction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a direction from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for AccountDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of an account for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Income / revenue account.
    Income,
    /// Expense account.
    Expense,
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
}

impl AccountClass {
    /// Returns the string representation of the class.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
        }
    }

    /// Parses a class from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            _ => None,
        }
    }
}

impl fmt::Display for AccountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The side of a double-entry pair an account is used on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    /// Account used as the credit side.
    Credit,
    /// Account used as the debit side.
    Debit,
}

impl fmt::Display for EntryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
        }
    }
}

/// A chart-of-accounts entry.
///
/// The `code` is a dot-less hierarchical code: every proper prefix of the
/// code denotes an ancestor account. Closing an ancestor does not cascade
/// to descendants; the resulting open-child-under-closed-parent state is
/// flagged by [`super::chart::has_invalid_config`], not prevented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// The owning user.
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Hierarchical code; may be empty for accounts outside the hierarchy.
    pub code: String,
    /// Whether the account is open for posting.
    pub is_open: bool,
    /// Read-only accounts cannot be used in any entry.
    pub is_read_only: bool,
    /// Directional typing constraint.
    pub direction: AccountDirection,
    /// Reporting classification.
    pub class: AccountClass,
    /// Opening balance carried into the ledger.
    pub opening_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip() {
        for d in [
            AccountDirection::Credit,
            AccountDirection::Debit,
            AccountDirection::Neutral,
        ] {
            assert_eq!(AccountDirection::parse(d.as_str()), Some(d));
        }
        assert_eq!(AccountDirection::parse("sideways"), None);
    }

    #[test]
    fn test_class_roundtrip() {
        for c in [
            AccountClass::Income,
            AccountClass::Expense,
            AccountClass::Asset,
            AccountClass::Liability,
            AccountClass::Equity,
        ] {
            assert_eq!(AccountClass::parse(c.as_str()), Some(c));
        }
        assert_eq!(AccountClass::parse("revenue2"), None);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", AccountDirection::Neutral), "neutral");
        assert_eq!(format!("{}", EntryRole::Debit), "debit");
    }
}
