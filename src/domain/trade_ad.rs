//! Trade advertisements posted by community members.

use crate::domain::TimeMs;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAdStatus {
    Active,
    Completed,
    Cancelled,
}

impl TradeAdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAdStatus::Active => "active",
            TradeAdStatus::Completed => "completed",
            TradeAdStatus::Cancelled => "cancelled",
        }
    }

    /// Only closing transitions may be requested by a poster.
    pub fn is_closing(&self) -> bool {
        matches!(self, TradeAdStatus::Completed | TradeAdStatus::Cancelled)
    }
}

impl FromStr for TradeAdStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TradeAdStatus::Active),
            "completed" => Ok(TradeAdStatus::Completed),
            "cancelled" => Ok(TradeAdStatus::Cancelled),
            other => Err(format!("unknown trade ad status: {}", other)),
        }
    }
}

/// Fields supplied by the poster of a new ad.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeAd {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items_wanted: Vec<String>,
    #[serde(default)]
    pub items_offering: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub contact_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAd {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub items_wanted: Vec<String>,
    pub items_offering: Vec<String>,
    pub tags: Vec<String>,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub contact_info: String,
    pub status: TradeAdStatus,
    pub created_at: TimeMs,
    pub expires_at: TimeMs,
}

impl NewTradeAd {
    /// First required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.author_name.trim().is_empty() {
            Some("authorName")
        } else {
            None
        }
    }
}

impl TradeAd {
    /// Open a new active ad that expires `ttl_ms` after `now`.
    pub fn open(new_ad: NewTradeAd, now: TimeMs, ttl_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new_ad.title.trim().to_string(),
            description: new_ad.description,
            items_wanted: new_ad.items_wanted,
            items_offering: new_ad.items_offering,
            tags: new_ad.tags,
            author_name: new_ad.author_name.trim().to_string(),
            author_avatar: new_ad.author_avatar.filter(|s| !s.trim().is_empty()),
            contact_info: new_ad.contact_info,
            status: TradeAdStatus::Active,
            created_at: now,
            expires_at: TimeMs::new(now.as_ms().saturating_add(ttl_ms)),
        }
    }
}
