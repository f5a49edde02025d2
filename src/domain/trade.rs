//! Trade sides, quantities and ledger entries.

use crate::domain::Item;
use serde::{Deserialize, Serialize};

/// One side of a prospective trade, from the acting user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Items the user gives away.
    Offered,
    /// Items the user receives.
    Requested,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Offered => write!(f, "offered"),
            TradeSide::Requested => write!(f, "requested"),
        }
    }
}

/// Units of an item in a ledger entry, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u16);

impl Quantity {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 999;

    /// Clamp any requested amount into the allowed range.
    pub fn clamped(requested: i64) -> Self {
        let q = requested.clamp(Self::MIN as i64, Self::MAX as i64);
        Quantity(q as u16)
    }

    pub fn one() -> Self {
        Quantity(Self::MIN)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::one()
    }
}

/// An item and how many of it sit on one side of the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub item: Item,
    pub quantity: Quantity,
}

impl LedgerEntry {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            quantity: Quantity::one(),
        }
    }

    pub fn value(&self) -> i64 {
        self.item.value * self.quantity.as_i64()
    }

    pub fn gem_tax(&self) -> i64 {
        self.item.gem_tax_or_zero() * self.quantity.as_i64()
    }

    pub fn gold_tax(&self) -> i64 {
        self.item.gold_tax_or_zero() * self.quantity.as_i64()
    }
}
