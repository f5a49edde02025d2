//! Name search, category filter and value ordering for the item catalog.

use crate::domain::Item;
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Lowest value first.
    Asc,
    /// Highest value first.
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
    /// Exact category; `None` keeps every category.
    pub category: Option<String>,
    pub order: SortOrder,
}

/// Apply `query` to `items`. Equal values are ordered by id.
pub fn filter_and_sort_items(items: Vec<Item>, query: &ItemQuery) -> Vec<Item> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let category = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut out: Vec<Item> = items
        .into_iter()
        .filter(|item| {
            needle
                .as_deref()
                .map_or(true, |n| item.name.to_lowercase().contains(n))
                && category.map_or(true, |c| item.category == c)
        })
        .collect();

    out.sort_by(|a, b| {
        let by_value = match query.order {
            SortOrder::Asc => a.value.cmp(&b.value),
            SortOrder::Desc => b.value.cmp(&a.value),
        };
        by_value.then_with(|| a.id.cmp(&b.id))
    });
    out
}

/// Sorted, de-duplicated non-empty categories.
pub fn distinct_categories(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.category.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
