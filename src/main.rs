// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::history_service::HistoryService;
use crate::application::market_state::MarketState;
use crate::application::poll_scheduler::PollScheduler;
use crate::application::quote_service::QuoteService;
use crate::domain::timeframe::Timeframe;
use crate::infrastructure::coingecko_repository::CoinGeckoRepository;
use crate::infrastructure::config::{load_chart_config, load_market_config};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, list_timeframes, select_section, select_timeframe,
    stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let market_config = load_market_config()?;
    let chart_config = load_chart_config()?;

    // Create repository (infrastructure layer)
    let fiat_unit = market_config.api.vs_currency.to_uppercase();
    let repository = Arc::new(CoinGeckoRepository::new(
        market_config.api.base_url,
        market_config.api.asset,
        market_config.api.vs_currency,
    ));

    // Create state slots and services (application layer)
    let state = Arc::new(MarketState::new());
    let history_service = HistoryService::new(repository.clone(), state.clone());
    let quote_service = QuoteService::new(repository.clone(), history_service.clone(), state.clone());
    let scheduler = PollScheduler::new(
        quote_service.clone(),
        Duration::from_secs(market_config.polling.interval_secs),
    );
    let dashboard_service = DashboardService::new(
        state.clone(),
        quote_service,
        history_service,
        scheduler,
    );

    // Initial fetches for the default timeframe, plus the periodic poll
    dashboard_service.select_timeframe(Timeframe::default()).await;

    // Create application state
    let app_state = Arc::new(AppState {
        dashboard_service,
        market_state: state,
        chart_settings: chart_config.series,
        fiat_unit,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/timeframes", get(list_timeframes))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/section", post(select_section))
        .route("/dashboard/timeframe", post(select_timeframe))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let addr: SocketAddr = market_config.server.listen.parse()?;
    println!("Starting coin-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
