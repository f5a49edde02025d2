use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{ChangeType, ItemId, ValueChange};
use crate::engine::{filter_and_sort, ValueChangeQuery, ValueChangeSort};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueChangesParams {
    pub search: Option<String>,
    pub change_type: Option<String>,
    pub sort_by: Option<String>,
    pub item_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValueChangesResponse {
    pub changes: Vec<ValueChange>,
}

impl ValueChangesParams {
    fn to_query(&self) -> Result<ValueChangeQuery, AppError> {
        let change_type = match non_empty(&self.change_type) {
            None | Some("all") => None,
            Some(raw) => Some(raw.parse::<ChangeType>().map_err(AppError::BadRequest)?),
        };
        let sort = match non_empty(&self.sort_by) {
            None => ValueChangeSort::default(),
            Some(raw) => raw.parse().map_err(AppError::BadRequest)?,
        };
        Ok(ValueChangeQuery {
            search: self.search.clone(),
            change_type,
            sort,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub async fn get_value_changes(
    Query(params): Query<ValueChangesParams>,
    State(state): State<AppState>,
) -> Result<Json<ValueChangesResponse>, AppError> {
    let query = params.to_query()?;
    let item_id = non_empty(&params.item_id).map(ItemId::new);

    let history = state.repo.list_value_changes(item_id.as_ref()).await?;
    Ok(Json(ValueChangesResponse {
        changes: filter_and_sort(history, &query),
    }))
}
