//! Catalog item record.

use crate::domain::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market trend of an item's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateOfChange {
    Rising,
    Falling,
    #[default]
    Stable,
    Overpriced,
}

impl RateOfChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateOfChange::Rising => "Rising",
            RateOfChange::Falling => "Falling",
            RateOfChange::Stable => "Stable",
            RateOfChange::Overpriced => "Overpriced",
        }
    }
}

impl fmt::Display for RateOfChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateOfChange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rising" => Ok(RateOfChange::Rising),
            "falling" => Ok(RateOfChange::Falling),
            "stable" => Ok(RateOfChange::Stable),
            "overpriced" => Ok(RateOfChange::Overpriced),
            other => Err(format!("unknown rate of change: {}", other)),
        }
    }
}

/// Whether an item can still be obtained in game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Obtainable,
    Unobtainable,
    Limited,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Obtainable => "Obtainable",
            ItemStatus::Unobtainable => "Unobtainable",
            ItemStatus::Limited => "Limited",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "obtainable" => Ok(ItemStatus::Obtainable),
            "unobtainable" => Ok(ItemStatus::Unobtainable),
            "limited" => Ok(ItemStatus::Limited),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}

/// A tradeable item as published by the catalog.
///
/// Taxes are per unit and paid by whoever sends the item. A missing tax
/// counts as zero in trade calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub demand: i64,
    #[serde(default)]
    pub rate_of_change: RateOfChange,
    #[serde(default)]
    pub prestige: i64,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub obtained_from: String,
    #[serde(default)]
    pub gem_tax: Option<i64>,
    #[serde(default)]
    pub gold_tax: Option<i64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rarity: Option<i64>,
    #[serde(default)]
    pub emoji: String,
}

impl Item {
    /// Minimal item with only the fields trade calculations read.
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            value,
            demand: 0,
            rate_of_change: RateOfChange::default(),
            prestige: 0,
            status: ItemStatus::default(),
            obtained_from: String::new(),
            gem_tax: None,
            gold_tax: None,
            category: String::new(),
            rarity: None,
            emoji: String::new(),
        }
    }

    pub fn with_taxes(mut self, gem_tax: i64, gold_tax: i64) -> Self {
        self.gem_tax = Some(gem_tax);
        self.gold_tax = Some(gold_tax);
        self
    }

    pub fn gem_tax_or_zero(&self) -> i64 {
        self.gem_tax.unwrap_or(0)
    }

    pub fn gold_tax_or_zero(&self) -> i64 {
        self.gold_tax.unwrap_or(0)
    }

    /// True when a catalog update would change the tracked market fields.
    pub fn market_differs(&self, other: &Item) -> bool {
        self.value != other.value
            || self.demand != other.demand
            || self.rate_of_change != other.rate_of_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_row_with_defaults() {
        let json = r#"{"id":"1","name":"Scarf","value":13,"goldTax":500000,"rateOfChange":"Rising"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "1");
        assert_eq!(item.value, 13);
        assert_eq!(item.rate_of_change, RateOfChange::Rising);
        assert_eq!(item.status, ItemStatus::Obtainable);
        assert_eq!(item.gem_tax_or_zero(), 0);
        assert_eq!(item.gold_tax_or_zero(), 500000);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let item = Item::new("2", "Armour Serum", 15).with_taxes(5000, 0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["gemTax"], 5000);
        assert_eq!(json["rateOfChange"], "Stable");
        assert!(json.get("gem_tax").is_none());
    }

    #[test]
    fn test_enum_parse_is_case_insensitive() {
        assert_eq!("overpriced".parse::<RateOfChange>(), Ok(RateOfChange::Overpriced));
        assert_eq!("LIMITED".parse::<ItemStatus>(), Ok(ItemStatus::Limited));
        assert!("soaring".parse::<RateOfChange>().is_err());
    }

    #[test]
    fn test_market_differs() {
        let a = Item::new("1", "Scarf", 13);
        let mut b = a.clone();
        b.emoji = "/scarf.png".to_string();
        assert!(!a.market_differs(&b));
        b.demand = 5;
        assert!(a.market_differs(&b));
    }
}
