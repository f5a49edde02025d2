//! In-memory catalog source for tests and seeding.

use super::{CatalogError, CatalogSource};
use crate::domain::Item;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    items: Vec<Item>,
}

impl StaticCatalogSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} items)", self.items.len())
    }
}
