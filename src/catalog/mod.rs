//! Item catalog sources and the sync that loads them into the repository.

use crate::db::Repository;
use crate::domain::{Item, TimeMs};
use crate::engine::Clock;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

pub mod file;
pub mod remote;
pub mod static_source;

pub use file::FileCatalogSource;
pub use remote::RemoteCatalogSource;
pub use static_source::StaticCatalogSource;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected http status: {0}")]
    HttpStatus(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("csv error: {0}")]
    Csv(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A place the full item catalog can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Outcome of one catalog sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub changes_recorded: usize,
}

/// Parse a JSON array of items, skipping entries that do not describe an item.
pub(crate) fn items_from_json(bytes: &[u8]) -> Result<Vec<Item>, CatalogError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut items = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Item>(entry) {
            Ok(item) => items.push(item),
            Err(e) => warn!(index = idx, error = %e, "Skipping malformed catalog entry"),
        }
    }
    Ok(items)
}

/// Upsert every item from `source`, recording value changes for repriced items.
///
/// # Errors
/// Returns an error if the source cannot be read or a write fails.
pub async fn sync_catalog(
    source: &dyn CatalogSource,
    repo: &Repository,
    clock: &dyn Clock,
) -> Result<SyncReport, CatalogError> {
    let items = source.fetch_items().await?;
    let at = TimeMs::from(clock.now());

    let mut report = SyncReport {
        fetched: items.len(),
        changes_recorded: 0,
    };
    for item in &items {
        if repo.upsert_item(item, at).await?.is_some() {
            report.changes_recorded += 1;
        }
    }

    info!(
        source = %source.describe(),
        fetched = report.fetched,
        changes_recorded = report.changes_recorded,
        "Catalog sync complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::domain::ItemId;
    use crate::engine::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    async fn setup() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    fn clock(hour: u32) -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_items_from_json_skips_bad_entries() {
        let json = br#"[{"id":"1","name":"Scarf","value":13},{"name":"no id"},{"id":"2","name":"Cape"}]"#;
        let items = items_from_json(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].value, 0);
    }

    #[test]
    fn test_items_from_json_rejects_non_array() {
        let err = items_from_json(br#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_sync_twice_records_only_repricing() {
        let (repo, _temp) = setup().await;
        let first = StaticCatalogSource::new(vec![
            Item::new("1", "Scarf", 13),
            Item::new("2", "Armour Serum", 15),
        ]);
        let report = sync_catalog(&first, &repo, &clock(9)).await.unwrap();
        assert_eq!(report, SyncReport { fetched: 2, changes_recorded: 0 });

        let second = StaticCatalogSource::new(vec![
            Item::new("1", "Scarf", 14),
            Item::new("2", "Armour Serum", 15),
        ]);
        let report = sync_catalog(&second, &repo, &clock(10)).await.unwrap();
        assert_eq!(report, SyncReport { fetched: 2, changes_recorded: 1 });

        let history = repo.list_value_changes(None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].item_name, "Scarf");
        assert_eq!(history[0].change_date, TimeMs::from(clock(10).now()));
    }

    #[tokio::test]
    async fn test_repeated_item_in_one_feed_keeps_every_change() {
        let (repo, _temp) = setup().await;
        let mut base = Item::new("1", "Scarf", 13);
        base.demand = 4;
        sync_catalog(&StaticCatalogSource::new(vec![base.clone()]), &repo, &clock(9))
            .await
            .unwrap();

        let mut first = base.clone();
        first.demand = 5;
        let mut second = base.clone();
        second.demand = 6;
        let feed = StaticCatalogSource::new(vec![first, second]);
        let report = sync_catalog(&feed, &repo, &clock(10)).await.unwrap();

        let history = repo.list_value_changes(None).await.unwrap();
        assert_eq!(report.changes_recorded, history.len());
        assert_eq!(history.len(), 2);
        let mut demands: Vec<(i64, i64)> =
            history.iter().map(|c| (c.old_demand, c.new_demand)).collect();
        demands.sort();
        assert_eq!(demands, vec![(4, 5), (5, 6)]);
        assert_eq!(
            repo.get_item(&ItemId::new("1")).await.unwrap().unwrap().demand,
            6
        );
    }
}
