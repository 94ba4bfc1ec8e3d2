// Quote service - Use case for polling the current price
use std::sync::Arc;

use crate::application::history_service::HistoryService;
use crate::application::market_state::MarketState;
use crate::application::price_repository::PriceRepository;
use crate::domain::market::PriceSnapshot;
use crate::domain::timeframe::Timeframe;

#[derive(Clone)]
pub struct QuoteService {
    repository: Arc<dyn PriceRepository>,
    history: HistoryService,
    state: Arc<MarketState>,
}

impl QuoteService {
    pub fn new(
        repository: Arc<dyn PriceRepository>,
        history: HistoryService,
        state: Arc<MarketState>,
    ) -> Self {
        Self {
            repository,
            history,
            state,
        }
    }

    /// Poll the spot price and refresh the snapshot slot. The one-day
    /// timeframe reuses the API's own 24h change figure; every other
    /// timeframe recomputes the change over its full window. A failed
    /// spot fetch leaves the previous snapshot untouched.
    pub async fn poll(&self, timeframe: Timeframe) {
        match self.repository.spot_quote().await {
            Ok(quote) => {
                let change = if timeframe == Timeframe::OneDay {
                    quote.change_24h
                } else {
                    self.history.change_over_window(timeframe).await
                };
                self.state
                    .set_snapshot(PriceSnapshot::new(quote.price, change))
                    .await;
                tracing::debug!(
                    "Polled spot price {} ({}% over {})",
                    quote.price,
                    change,
                    timeframe.as_str()
                );
            }
            Err(e) => {
                tracing::error!("Error fetching spot price: {e:#}");
            }
        }
    }
}
