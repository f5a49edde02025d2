//! Stateless trade calculation: a ledger pair in, totals and verdict out.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::AppState;
use crate::domain::{Item, ItemId, LedgerEntry, TradeSide};
use crate::engine::{FairnessView, ReconciliationResult, TradeLedger};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub item_id: ItemId,
    pub quantity: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub offered: Vec<LineRequest>,
    #[serde(default)]
    pub requested: Vec<LineRequest>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub offered: Vec<LedgerEntry>,
    pub requested: Vec<LedgerEntry>,
    #[serde(flatten)]
    pub totals: ReconciliationResult,
    #[serde(flatten)]
    pub fairness: FairnessView,
}

pub async fn calculate(
    State(state): State<AppState>,
    Json(body): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    let ids: Vec<ItemId> = body
        .offered
        .iter()
        .chain(&body.requested)
        .map(|line| line.item_id.clone())
        .collect();
    let catalog = state.repo.get_items_by_ids(&ids).await?;

    let mut ledger = TradeLedger::new();
    fill_side(&mut ledger, TradeSide::Offered, &body.offered, &catalog)?;
    fill_side(&mut ledger, TradeSide::Requested, &body.requested, &catalog)?;

    let totals = ledger.reconcile();
    Ok(Json(CalculateResponse {
        offered: ledger.entries(TradeSide::Offered).to_vec(),
        requested: ledger.entries(TradeSide::Requested).to_vec(),
        fairness: FairnessView::from_result(&totals),
        totals,
    }))
}

/// Append each line in order; repeated items stay separate entries.
fn fill_side(
    ledger: &mut TradeLedger,
    side: TradeSide,
    lines: &[LineRequest],
    catalog: &HashMap<ItemId, Item>,
) -> Result<(), AppError> {
    for (idx, line) in lines.iter().enumerate() {
        let item = catalog
            .get(&line.item_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("unknown item: {}", line.item_id)))?;
        ledger.add_item(side, item);
        ledger.set_quantity(side, idx, line.quantity.unwrap_or(1));
    }
    Ok(())
}
