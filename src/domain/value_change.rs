//! Historical record of a catalog value update.

use crate::domain::{Item, ItemId, Percentage, RateOfChange, TimeMs};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction of a value update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Stable,
}

impl ChangeType {
    pub fn classify(old_value: i64, new_value: i64) -> Self {
        match new_value.cmp(&old_value) {
            std::cmp::Ordering::Greater => ChangeType::Increase,
            std::cmp::Ordering::Less => ChangeType::Decrease,
            std::cmp::Ordering::Equal => ChangeType::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Increase => "increase",
            ChangeType::Decrease => "decrease",
            ChangeType::Stable => "stable",
        }
    }
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" => Ok(ChangeType::Increase),
            "decrease" => Ok(ChangeType::Decrease),
            "stable" => Ok(ChangeType::Stable),
            other => Err(format!("unknown change type: {}", other)),
        }
    }
}

/// A value/demand/trend update applied to one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueChange {
    /// Stable key derived from the item, time and values.
    pub id: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub emoji: String,
    pub old_value: i64,
    pub new_value: i64,
    pub old_demand: i64,
    pub new_demand: i64,
    pub old_rate_of_change: RateOfChange,
    pub new_rate_of_change: RateOfChange,
    pub change_date: TimeMs,
    pub change_type: ChangeType,
    pub percentage_change: Percentage,
}

impl ValueChange {
    /// Build the change record for `previous` being replaced by `current`.
    pub fn between(previous: &Item, current: &Item, change_date: TimeMs) -> Self {
        let id = Self::compute_id(previous, current, change_date);
        Self {
            id,
            item_id: current.id.clone(),
            item_name: current.name.clone(),
            emoji: current.emoji.clone(),
            old_value: previous.value,
            new_value: current.value,
            old_demand: previous.demand,
            new_demand: current.demand,
            old_rate_of_change: previous.rate_of_change,
            new_rate_of_change: current.rate_of_change,
            change_date,
            change_type: ChangeType::classify(previous.value, current.value),
            percentage_change: Percentage::change(previous.value, current.value),
        }
    }

    /// SHA-256 over the item, time and both market snapshots, truncated to 128 bits.
    pub fn compute_id(previous: &Item, current: &Item, change_date: TimeMs) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        let id = current.id.as_str();
        hasher.update((id.len() as u32).to_le_bytes());
        hasher.update(id.as_bytes());
        hasher.update(change_date.as_ms().to_le_bytes());
        for snapshot in [previous, current] {
            hasher.update(snapshot.value.to_le_bytes());
            hasher.update(snapshot.demand.to_le_bytes());
            let rate = snapshot.rate_of_change.as_str();
            hasher.update([rate.len() as u8]);
            hasher.update(rate.as_bytes());
        }

        let hash = hasher.finalize();
        format!("vc:{}", hex::encode(&hash[..16]))
    }
}
