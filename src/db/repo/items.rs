//! Catalog item operations for the repository.

use crate::domain::{Item, ItemId, TimeMs, ValueChange};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;
use tracing::debug;

use super::{parse_column, Repository};

const ITEM_COLUMNS: &str = "id, name, value, demand, rate_of_change, prestige, status, \
     obtained_from, gem_tax, gold_tax, category, rarity, emoji";

fn item_from_row(row: &SqliteRow) -> Item {
    let id: String = row.get("id");
    let rate_of_change: String = row.get("rate_of_change");
    let status: String = row.get("status");

    Item {
        rate_of_change: parse_column(&rate_of_change, "rate_of_change", &id),
        status: parse_column(&status, "status", &id),
        id: ItemId::new(id),
        name: row.get("name"),
        value: row.get("value"),
        demand: row.get("demand"),
        prestige: row.get("prestige"),
        obtained_from: row.get("obtained_from"),
        gem_tax: row.get("gem_tax"),
        gold_tax: row.get("gold_tax"),
        category: row.get("category"),
        rarity: row.get("rarity"),
        emoji: row.get("emoji"),
    }
}

impl Repository {
    /// List every catalog item, most valuable first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_items(&self) -> Result<Vec<Item>, sqlx::Error> {
        let sql = format!("SELECT {} FROM items ORDER BY value DESC, id ASC", ITEM_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(item_from_row).collect())
    }

    /// Get a single item by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, sqlx::Error> {
        let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(item_from_row))
    }

    /// Fetch the items for a set of ids, keyed by id. Unknown ids are absent.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_items_by_ids(
        &self,
        ids: &[ItemId],
    ) -> Result<HashMap<ItemId, Item>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM items WHERE id IN ({})",
            ITEM_COLUMNS, placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(item_from_row)
            .map(|item| (item.id.clone(), item))
            .collect())
    }

    /// Insert or replace an item.
    ///
    /// When the item already exists and its value, demand or trend changes,
    /// a value-change record is written in the same transaction. Returns the
    /// change that was newly stored, if any.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn upsert_item(
        &self,
        item: &Item,
        at: TimeMs,
    ) -> Result<Option<ValueChange>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let previous = sqlx::query(&sql)
            .bind(item.id.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .as_ref()
            .map(item_from_row);

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, value, demand, rate_of_change, prestige, status,
                obtained_from, gem_tax, gold_tax, category, rarity, emoji,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                value = excluded.value,
                demand = excluded.demand,
                rate_of_change = excluded.rate_of_change,
                prestige = excluded.prestige,
                status = excluded.status,
                obtained_from = excluded.obtained_from,
                gem_tax = excluded.gem_tax,
                gold_tax = excluded.gold_tax,
                category = excluded.category,
                rarity = excluded.rarity,
                emoji = excluded.emoji,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(item.id.as_str())
        .bind(&item.name)
        .bind(item.value)
        .bind(item.demand)
        .bind(item.rate_of_change.as_str())
        .bind(item.prestige)
        .bind(item.status.as_str())
        .bind(&item.obtained_from)
        .bind(item.gem_tax)
        .bind(item.gold_tax)
        .bind(&item.category)
        .bind(item.rarity)
        .bind(&item.emoji)
        .bind(at.as_ms())
        .bind(at.as_ms())
        .execute(&mut *tx)
        .await?;

        let change = match previous {
            Some(prev) if prev.market_differs(item) => {
                let change = ValueChange::between(&prev, item, at);
                if Self::insert_value_change_in(&mut tx, &change).await? {
                    debug!(
                        item = %item.id,
                        old_value = change.old_value,
                        new_value = change.new_value,
                        "recorded value change"
                    );
                    Some(change)
                } else {
                    debug!(item = %item.id, id = %change.id, "value change already recorded");
                    None
                }
            }
            _ => None,
        };

        tx.commit().await?;
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::domain::{ChangeType, RateOfChange};
    use tempfile::TempDir;

    async fn setup() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_list_items_orders_by_value_desc() {
        let (repo, _temp) = setup().await;
        repo.upsert_item(&Item::new("1", "Scarf", 13), TimeMs::new(1)).await.unwrap();
        repo.upsert_item(&Item::new("2", "Armour Serum", 15), TimeMs::new(1)).await.unwrap();
        repo.upsert_item(&Item::new("3", "Cape", 13), TimeMs::new(1)).await.unwrap();

        let names: Vec<String> = repo
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Armour Serum", "Scarf", "Cape"]);
    }

    #[tokio::test]
    async fn test_get_item_roundtrips_optional_taxes() {
        let (repo, _temp) = setup().await;
        let mut item = Item::new("1", "Scarf", 13);
        item.gold_tax = Some(500_000);
        repo.upsert_item(&item, TimeMs::new(1)).await.unwrap();

        let stored = repo.get_item(&ItemId::new("1")).await.unwrap().unwrap();
        assert_eq!(stored, item);
        assert_eq!(stored.gem_tax, None);

        assert!(repo.get_item(&ItemId::new("404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_items_by_ids_skips_unknown() {
        let (repo, _temp) = setup().await;
        repo.upsert_item(&Item::new("1", "Scarf", 13), TimeMs::new(1)).await.unwrap();

        let found = repo
            .get_items_by_ids(&[ItemId::new("1"), ItemId::new("nope")])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&ItemId::new("1")));
    }

    #[tokio::test]
    async fn test_first_insert_records_no_change() {
        let (repo, _temp) = setup().await;
        let change = repo
            .upsert_item(&Item::new("1", "Scarf", 13), TimeMs::new(1))
            .await
            .unwrap();
        assert!(change.is_none());
        assert!(repo.list_value_changes(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_value_update_records_change() {
        let (repo, _temp) = setup().await;
        let item = Item::new("1", "Scarf", 13);
        repo.upsert_item(&item, TimeMs::new(1)).await.unwrap();

        let mut updated = item.clone();
        updated.value = 10;
        updated.rate_of_change = RateOfChange::Falling;
        let change = repo
            .upsert_item(&updated, TimeMs::new(2))
            .await
            .unwrap()
            .expect("change recorded");

        assert_eq!(change.change_type, ChangeType::Decrease);
        assert_eq!(change.old_value, 13);
        assert_eq!(change.new_value, 10);

        let history = repo.list_value_changes(None).await.unwrap();
        assert_eq!(history, vec![change]);
        assert_eq!(
            repo.get_item(&item.id).await.unwrap().unwrap().value,
            10
        );
    }

    #[tokio::test]
    async fn test_already_stored_change_is_not_reported() {
        let (repo, _temp) = setup().await;
        let item = Item::new("1", "Scarf", 13);
        repo.upsert_item(&item, TimeMs::new(1)).await.unwrap();

        let mut updated = item.clone();
        updated.value = 10;
        let existing = ValueChange::between(&item, &updated, TimeMs::new(2));
        let mut tx = repo.pool.begin().await.unwrap();
        Repository::insert_value_change_in(&mut tx, &existing)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let change = repo.upsert_item(&updated, TimeMs::new(2)).await.unwrap();
        assert!(change.is_none());
        assert_eq!(repo.list_value_changes(None).await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_cosmetic_update_records_no_change() {
        let (repo, _temp) = setup().await;
        let item = Item::new("1", "Scarf", 13);
        repo.upsert_item(&item, TimeMs::new(1)).await.unwrap();

        let mut updated = item.clone();
        updated.emoji = "/scarf.png".to_string();
        let change = repo.upsert_item(&updated, TimeMs::new(2)).await.unwrap();
        assert!(change.is_none());
        assert_eq!(
            repo.get_item(&item.id).await.unwrap().unwrap().emoji,
            "/scarf.png"
        );
    }
}
