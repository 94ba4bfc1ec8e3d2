// Application state for HTTP handlers
use std::sync::Arc;

use crate::application::dashboard_service::DashboardService;
use crate::application::market_state::MarketState;
use crate::infrastructure::config::ChartSeriesSettings;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub market_state: Arc<MarketState>,
    pub chart_settings: ChartSeriesSettings,
    /// Display unit next to the price, e.g. "USD".
    pub fiat_unit: String,
}
