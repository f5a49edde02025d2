//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `items.rs` - Catalog items, with value-change recording on update
//! - `value_changes.rs` - Value-change history queries
//! - `trade_ads.rs` - Trade advertisement listing and status updates

mod items;
mod trade_ads;
mod value_changes;

use sqlx::sqlite::SqlitePool;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Round-trip a trivial query to confirm the pool is usable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Parse a stored enum/decimal column, falling back to the default on bad data.
fn parse_column<T>(raw: &str, column: &'static str, row_id: &str) -> T
where
    T: FromStr + Default,
    T::Err: Display,
{
    raw.parse::<T>().unwrap_or_else(|e| {
        warn!(
            row = %row_id,
            column,
            value = %raw,
            error = %e,
            "Failed to parse stored column, using default"
        );
        T::default()
    })
}
