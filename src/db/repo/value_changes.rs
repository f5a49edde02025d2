//! Value-change history operations for the repository.

use crate::domain::{ChangeType, ItemId, RateOfChange, TimeMs, ValueChange};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

use super::{parse_column, Repository};

fn value_change_from_row(row: &SqliteRow) -> ValueChange {
    let id: String = row.get("id");
    let old_value: i64 = row.get("old_value");
    let new_value: i64 = row.get("new_value");
    let old_rate: String = row.get("old_rate_of_change");
    let new_rate: String = row.get("new_rate_of_change");
    let percentage: String = row.get("percentage_change");

    ValueChange {
        item_id: ItemId::new(row.get::<String, _>("item_id")),
        item_name: row.get("item_name"),
        emoji: row.get("emoji"),
        old_value,
        new_value,
        old_demand: row.get("old_demand"),
        new_demand: row.get("new_demand"),
        old_rate_of_change: parse_column::<RateOfChange>(&old_rate, "old_rate_of_change", &id),
        new_rate_of_change: parse_column::<RateOfChange>(&new_rate, "new_rate_of_change", &id),
        change_date: TimeMs::new(row.get("change_date")),
        // Derived from the values so a bad stored label cannot disagree with them.
        change_type: ChangeType::classify(old_value, new_value),
        percentage_change: parse_column(&percentage, "percentage_change", &id),
        id,
    }
}

impl Repository {
    /// Insert a value change idempotently within an open transaction.
    pub(super) async fn insert_value_change_in(
        tx: &mut Transaction<'_, Sqlite>,
        change: &ValueChange,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO value_changes (
                id, item_id, item_name, emoji, old_value, new_value,
                old_demand, new_demand, old_rate_of_change, new_rate_of_change,
                change_date, change_type, percentage_change
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&change.id)
        .bind(change.item_id.as_str())
        .bind(&change.item_name)
        .bind(&change.emoji)
        .bind(change.old_value)
        .bind(change.new_value)
        .bind(change.old_demand)
        .bind(change.new_demand)
        .bind(change.old_rate_of_change.as_str())
        .bind(change.new_rate_of_change.as_str())
        .bind(change.change_date.as_ms())
        .bind(change.change_type.as_str())
        .bind(change.percentage_change.to_canonical_string())
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Value changes, newest first, optionally for one item.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_value_changes(
        &self,
        item_id: Option<&ItemId>,
    ) -> Result<Vec<ValueChange>, sqlx::Error> {
        let rows = match item_id {
            Some(id) => {
                sqlx::query(
                    r#"
                    SELECT * FROM value_changes
                    WHERE item_id = ?
                    ORDER BY change_date DESC, id ASC
                    "#,
                )
                .bind(id.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT * FROM value_changes ORDER BY change_date DESC, id ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.iter().map(value_change_from_row).collect())
    }
}
