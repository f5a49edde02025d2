pub mod calculator;
pub mod health;
pub mod items;
pub mod restock;
pub mod trade_ads;
pub mod value_changes;

use crate::config::Config;
use crate::db::Repository;
use crate::engine::Clock;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/items", get(items::list_items))
        .route("/v1/items/:id", get(items::get_item))
        .route("/v1/trade/calculate", post(calculator::calculate))
        .route("/v1/restock", get(restock::get_restock))
        .route("/v1/restock/stream", get(restock::stream_restock))
        .route("/v1/value-changes", get(value_changes::get_value_changes))
        .route(
            "/v1/trade-ads",
            get(trade_ads::list_trade_ads).post(trade_ads::create_trade_ad),
        )
        .route(
            "/v1/trade-ads/:id/status",
            post(trade_ads::update_trade_ad_status),
        )
        .layer(cors)
        .with_state(state)
}
