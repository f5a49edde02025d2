//! Trade advertisement operations for the repository.

use crate::domain::{TimeMs, TradeAd, TradeAdStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;
use uuid::Uuid;

use super::Repository;

fn string_list(raw: &str, column: &'static str, row_id: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(row = %row_id, column, error = %e, "Failed to parse stored list, using empty");
        Vec::new()
    })
}

fn trade_ad_from_row(row: &SqliteRow) -> Option<TradeAd> {
    let raw_id: String = row.get("id");
    let id = match Uuid::parse_str(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            warn!(row = %raw_id, error = %e, "Skipping trade ad with malformed id");
            return None;
        }
    };

    let status_raw: String = row.get("status");
    let status = status_raw.parse::<TradeAdStatus>().unwrap_or_else(|e| {
        warn!(row = %raw_id, error = %e, "Unknown trade ad status, treating as cancelled");
        TradeAdStatus::Cancelled
    });

    let items_wanted: String = row.get("items_wanted");
    let items_offering: String = row.get("items_offering");
    let tags: String = row.get("tags");

    Some(TradeAd {
        id,
        title: row.get("title"),
        description: row.get("description"),
        items_wanted: string_list(&items_wanted, "items_wanted", &raw_id),
        items_offering: string_list(&items_offering, "items_offering", &raw_id),
        tags: string_list(&tags, "tags", &raw_id),
        author_name: row.get("author_name"),
        author_avatar: row.get("author_avatar"),
        contact_info: row.get("contact_info"),
        status,
        created_at: TimeMs::new(row.get("created_at")),
        expires_at: TimeMs::new(row.get("expires_at")),
    })
}

fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

impl Repository {
    /// Store a newly opened trade ad.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_trade_ad(&self, ad: &TradeAd) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO trade_ads (
                id, title, description, items_wanted, items_offering, tags,
                author_name, author_avatar, contact_info, status, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(ad.id.to_string())
        .bind(&ad.title)
        .bind(&ad.description)
        .bind(encode_list(&ad.items_wanted))
        .bind(encode_list(&ad.items_offering))
        .bind(encode_list(&ad.tags))
        .bind(&ad.author_name)
        .bind(&ad.author_avatar)
        .bind(&ad.contact_info)
        .bind(ad.status.as_str())
        .bind(ad.created_at.as_ms())
        .bind(ad.expires_at.as_ms())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Active, unexpired ads, newest first, at most `limit` of them.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_active_trade_ads(
        &self,
        now: TimeMs,
        limit: i64,
    ) -> Result<Vec<TradeAd>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM trade_ads
            WHERE status = 'active' AND expires_at >= ?
            ORDER BY created_at DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(now.as_ms())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().filter_map(trade_ad_from_row).collect())
    }

    pub async fn get_trade_ad(&self, id: Uuid) -> Result<Option<TradeAd>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM trade_ads WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().and_then(trade_ad_from_row))
    }

    /// Set the status of an ad. Returns false when no ad has this id.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_trade_ad_status(
        &self,
        id: Uuid,
        status: TradeAdStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE trade_ads SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
