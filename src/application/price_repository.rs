// Repository trait for price data access
use async_trait::async_trait;

use crate::domain::market::PricePoint;
use crate::domain::timeframe::SampleInterval;

/// Current spot price together with the API-provided 24-hour change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotQuote {
    pub price: f64,
    pub change_24h: f64,
}

#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Fetch the current spot price and 24h change for the tracked asset.
    async fn spot_quote(&self) -> anyhow::Result<SpotQuote>;

    /// Fetch the historical price series over the given lookback window,
    /// optionally at a fixed sampling granularity. Points are returned in
    /// the API's order (ascending timestamp).
    async fn market_chart(
        &self,
        days: u32,
        interval: Option<SampleInterval>,
    ) -> anyhow::Result<Vec<PricePoint>>;
}
