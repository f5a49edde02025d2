use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{Item, ItemId};
use crate::engine::{distinct_categories, filter_and_sort_items, ItemQuery, SortOrder};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    /// Every category in the catalog, regardless of the filters applied.
    pub categories: Vec<String>,
}

impl ItemsParams {
    fn to_query(&self) -> Result<ItemQuery, AppError> {
        let order = match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::default(),
            Some(raw) => raw.parse().map_err(AppError::BadRequest)?,
        };
        Ok(ItemQuery {
            search: self.search.clone(),
            category: self.category.clone(),
            order,
        })
    }
}

pub async fn list_items(
    Query(params): Query<ItemsParams>,
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse>, AppError> {
    let query = params.to_query()?;
    let catalog = state.repo.list_items().await?;
    let categories = distinct_categories(&catalog);
    Ok(Json(ItemsResponse {
        items: filter_and_sort_items(catalog, &query),
        categories,
    }))
}

pub async fn get_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Item>, AppError> {
    let id = ItemId::new(id);
    state
        .repo
        .get_item(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
}
