//! Search, filter and deterministic ordering of value-change history.

use crate::domain::{ChangeType, ValueChange};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueChangeSort {
    /// Newest first.
    #[default]
    Date,
    /// Largest absolute percentage first.
    Percentage,
    /// Highest new value first.
    Value,
}

impl FromStr for ValueChangeSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(ValueChangeSort::Date),
            "percentage" => Ok(ValueChangeSort::Percentage),
            "value" => Ok(ValueChangeSort::Value),
            other => Err(format!("unknown sort: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueChangeQuery {
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
    /// `None` keeps every change type.
    pub change_type: Option<ChangeType>,
    pub sort: ValueChangeSort,
}

impl ValueChangeQuery {
    fn matches(&self, change: &ValueChange, needle: Option<&str>) -> bool {
        let name_ok = needle.map_or(true, |n| change.item_name.to_lowercase().contains(n));
        let type_ok = self.change_type.map_or(true, |t| change.change_type == t);
        name_ok && type_ok
    }
}

/// Apply `query` to `changes`. Ties are broken by id so output is stable.
pub fn filter_and_sort(changes: Vec<ValueChange>, query: &ValueChangeQuery) -> Vec<ValueChange> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<ValueChange> = changes
        .into_iter()
        .filter(|c| query.matches(c, needle.as_deref()))
        .collect();

    out.sort_by(|a, b| primary_order(a, b, query.sort).then_with(|| a.id.cmp(&b.id)));
    out
}

fn primary_order(a: &ValueChange, b: &ValueChange, sort: ValueChangeSort) -> Ordering {
    match sort {
        ValueChangeSort::Date => b.change_date.cmp(&a.change_date),
        ValueChangeSort::Percentage => b
            .percentage_change
            .abs()
            .cmp(&a.percentage_change.abs()),
        ValueChangeSort::Value => b.new_value.cmp(&a.new_value),
    }
}
