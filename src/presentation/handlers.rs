// HTTP request handlers
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use crate::application::market_state::SlotChange;
use crate::domain::dashboard::Section;
use crate::domain::timeframe::Timeframe;
use crate::infrastructure::chunked_json::chunked_json_stream;
use crate::infrastructure::http_response::json_response;
use crate::infrastructure::view_mapper;
use crate::presentation::app_state::AppState;

#[derive(Deserialize)]
pub struct TimeframeRequest {
    pub timeframe: Timeframe,
}

#[derive(Deserialize)]
pub struct SectionRequest {
    pub section: Section,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the selectable timeframes
pub async fn list_timeframes(headers: HeaderMap) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    match json_response(&view_mapper::timeframe_options(), compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Current full dashboard view
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    let view = state.dashboard_service.view().await;
    let payload = view_mapper::view_payload(&view, &state.fiat_unit, &state.chart_settings);

    match json_response(&payload, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream the dashboard: the full view first, then one increment per
/// state-slot change for as long as the client stays connected.
pub async fn stream_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    let market_state = state.market_state.clone();
    let chart_settings = state.chart_settings.clone();
    let fiat_unit = state.fiat_unit.clone();
    let changes = market_state.subscribe();

    let stream = async_stream::stream! {
        let view = market_state.view().await;
        yield view_mapper::full_view_envelope(&view, &fiat_unit, &chart_settings);

        let mut changes = BroadcastStream::new(changes);
        while let Some(change) = changes.next().await {
            // A lagged receiver just skips to the next change; every
            // increment carries the slot's current value anyway.
            let Ok(change) = change else { continue };
            match change {
                SlotChange::Snapshot => {
                    let snapshot = market_state.snapshot().await;
                    yield view_mapper::snapshot_envelope(&snapshot, &fiat_unit);
                }
                SlotChange::Series => {
                    let series = market_state.series().await;
                    yield view_mapper::chart_envelope(&series, &chart_settings);
                }
                SlotChange::Timeframe => {
                    yield view_mapper::timeframe_envelope(market_state.timeframe().await);
                }
                SlotChange::Section => {
                    yield view_mapper::section_envelope(market_state.section().await);
                }
            }
        }
    };

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Select the visible content section; no data refetch.
pub async fn select_section(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SectionRequest>,
) -> StatusCode {
    state.dashboard_service.select_section(request.section).await;
    StatusCode::NO_CONTENT
}

/// Select the timeframe: triggers the snapshot and series refreshes and
/// re-arms the periodic poll.
pub async fn select_timeframe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimeframeRequest>,
) -> StatusCode {
    state
        .dashboard_service
        .select_timeframe(request.timeframe)
        .await;
    StatusCode::NO_CONTENT
}

fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert("accept-encoding", "gzip, br".parse().unwrap());
        assert!(accepts_brotli(&headers));

        headers.insert("accept-encoding", "gzip, deflate".parse().unwrap());
        assert!(!accepts_brotli(&headers));
    }

    #[test]
    fn test_event_requests_decode() {
        let request: TimeframeRequest = serde_json::from_str(r#"{"timeframe":"3m"}"#).unwrap();
        assert_eq!(request.timeframe, Timeframe::ThreeMonths);

        let request: SectionRequest = serde_json::from_str(r#"{"section":"summary"}"#).unwrap();
        assert_eq!(request.section, Section::Summary);
    }
}
