use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::{self, Stream};
use serde::Serialize;
use std::time::Duration;

use super::AppState;
use crate::engine::Countdown;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    pub seconds_remaining: u32,
    pub formatted: String,
    pub next_reset_hour: u32,
    pub time_zone: String,
}

impl RestockResponse {
    fn current(state: &AppState) -> Self {
        let restock = &state.config.restock;
        let countdown: Countdown = restock.now(state.clock.as_ref());
        Self {
            seconds_remaining: countdown.seconds_remaining,
            formatted: countdown.formatted(),
            next_reset_hour: countdown.next_reset_hour,
            time_zone: restock.time_zone().name().to_string(),
        }
    }
}

pub async fn get_restock(State(state): State<AppState>) -> Json<RestockResponse> {
    Json(RestockResponse::current(&state))
}

/// One `countdown` event per second.
pub async fn stream_restock(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let ticker = tokio::time::interval(Duration::from_secs(1));

    let events = stream::unfold((ticker, state), |(mut ticker, state)| async move {
        ticker.tick().await;
        let event = Event::default()
            .event("countdown")
            .json_data(RestockResponse::current(&state));
        Some((event, (ticker, state)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
