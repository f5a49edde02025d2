//! Catalog stored on disk as a JSON array or a CSV export.

use super::{items_from_json, CatalogError, CatalogSource};
use crate::domain::{Item, ItemId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    fn of(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("csv") => Ok(FileFormat::Csv),
            _ => Err(CatalogError::Parse(format!(
                "unsupported catalog file: {}",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a CSV export with snake_case headers.
    ///
    /// Rows that fail to parse are logged and skipped.
    pub fn parse_csv(csv_bytes: &[u8]) -> Result<Vec<Item>, CatalogError> {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            id: String,
            name: String,
            #[serde(default)]
            value: i64,
            #[serde(default)]
            demand: i64,
            #[serde(default)]
            rate_of_change: String,
            #[serde(default)]
            prestige: i64,
            #[serde(default)]
            status: String,
            #[serde(default)]
            obtained_from: String,
            gem_tax: Option<i64>,
            gold_tax: Option<i64>,
            #[serde(default)]
            category: String,
            rarity: Option<i64>,
            #[serde(default)]
            emoji: String,
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_bytes);

        // Fail on an unreadable header; individual rows are skipped instead.
        reader
            .headers()
            .map_err(|e| CatalogError::Csv(e.to_string()))?;

        let mut items = Vec::new();
        for (line, record) in reader.deserialize::<Row>().enumerate() {
            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    warn!(row = line + 1, error = %e, "Skipping malformed catalog row");
                    continue;
                }
            };
            if row.id.is_empty() || row.name.is_empty() {
                warn!(row = line + 1, "Skipping catalog row without id or name");
                continue;
            }

            items.push(Item {
                id: ItemId::new(row.id),
                name: row.name,
                value: row.value,
                demand: row.demand,
                rate_of_change: row.rate_of_change.parse().unwrap_or_default(),
                prestige: row.prestige,
                status: row.status.parse().unwrap_or_default(),
                obtained_from: row.obtained_from,
                gem_tax: row.gem_tax,
                gold_tax: row.gold_tax,
                category: row.category,
                rarity: row.rarity,
                emoji: row.emoji,
            });
        }

        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError> {
        let format = FileFormat::of(&self.path)?;
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read catalog file");

        match format {
            FileFormat::Json => items_from_json(&bytes),
            FileFormat::Csv => Self::parse_csv(&bytes),
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
