use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::domain::{NewTradeAd, TimeMs, TradeAd, TradeAdStatus};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAdsResponse {
    pub trade_ads: Vec<TradeAd>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

pub async fn list_trade_ads(
    State(state): State<AppState>,
) -> Result<Json<TradeAdsResponse>, AppError> {
    let now = TimeMs::from(state.clock.now());
    let trade_ads = state
        .repo
        .list_active_trade_ads(now, state.config.trade_ad_page_size)
        .await?;
    Ok(Json(TradeAdsResponse { trade_ads }))
}

pub async fn create_trade_ad(
    State(state): State<AppState>,
    Json(new_ad): Json<NewTradeAd>,
) -> Result<(StatusCode, Json<TradeAd>), AppError> {
    if let Some(field) = new_ad.missing_field() {
        return Err(AppError::BadRequest(format!("{} must not be blank", field)));
    }

    let now = TimeMs::from(state.clock.now());
    let ad = TradeAd::open(new_ad, now, state.config.trade_ad_ttl_ms());
    state.repo.insert_trade_ad(&ad).await?;
    info!(id = %ad.id, author = %ad.author_name, "Trade ad posted");

    Ok((StatusCode::CREATED, Json(ad)))
}

pub async fn update_trade_ad_status(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<TradeAd>, AppError> {
    let id = Uuid::parse_str(id.trim())
        .map_err(|_| AppError::BadRequest(format!("invalid trade ad id: {}", id)))?;
    let status: TradeAdStatus = update.status.parse().map_err(AppError::BadRequest)?;
    if !status.is_closing() {
        return Err(AppError::BadRequest(format!(
            "status can only be set to completed or cancelled, got {}",
            status.as_str()
        )));
    }

    if !state.repo.update_trade_ad_status(id, status).await? {
        return Err(AppError::NotFound(format!("trade ad {}", id)));
    }
    state
        .repo
        .get_trade_ad(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("trade ad {}", id)))
}
