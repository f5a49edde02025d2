//! Domain types for the item catalog and trade calculator.
//!
//! This module provides:
//! - Domain primitives: TimeMs, ItemId
//! - Catalog items with their market and tax fields
//! - Trade sides, clamped quantities and ledger entries
//! - Value-change history records and trade advertisements

pub mod item;
pub mod percentage;
pub mod primitives;
pub mod trade;
pub mod trade_ad;
pub mod value_change;

pub use item::{Item, ItemStatus, RateOfChange};
pub use percentage::Percentage;
pub use primitives::{ItemId, TimeMs};
pub use trade::{LedgerEntry, Quantity, TradeSide};
pub use trade_ad::{NewTradeAd, TradeAd, TradeAdStatus};
pub use value_change::{ChangeType, ValueChange};
