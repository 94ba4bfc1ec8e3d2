// CoinGecko repository implementation
use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::application::price_repository::{PriceRepository, SpotQuote};
use crate::domain::market::PricePoint;
use crate::domain::timeframe::SampleInterval;

#[derive(Debug, Error)]
pub enum CoinGeckoError {
    #[error("request to price API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("price API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("asset '{0}' missing from price response")]
    MissingAsset(String),
    #[error("malformed price response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct CoinGeckoRepository {
    base_url: String,
    asset: String,
    vs_currency: String,
    client: reqwest::Client,
}

/// `/simple/price` response: one entry per asset, keyed by asset id, with
/// currency and `<currency>_24h_change` keys inside.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoRepository {
    pub fn new(base_url: String, asset: String, vs_currency: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            asset,
            vs_currency,
            client: reqwest::Client::new(),
        }
    }

    fn spot_url(&self) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies={}&include_24hr_change=true",
            self.base_url,
            urlencoding::encode(&self.asset),
            urlencoding::encode(&self.vs_currency)
        )
    }

    fn market_chart_url(&self, days: u32, interval: Option<SampleInterval>) -> String {
        let mut url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(&self.asset),
            urlencoding::encode(&self.vs_currency),
            days
        );
        if let Some(interval) = interval {
            url.push_str("&interval=");
            url.push_str(interval.as_str());
        }
        url
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CoinGeckoError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CoinGeckoError::Status { status, body });
        }

        Ok(response)
    }

    async fn fetch_spot(&self) -> Result<SpotQuote, CoinGeckoError> {
        let response = self.get(&self.spot_url()).await?;
        let data: SimplePriceResponse = response.json().await?;

        let entry = data
            .get(&self.asset)
            .ok_or_else(|| CoinGeckoError::MissingAsset(self.asset.clone()))?;

        let price = *entry.get(&self.vs_currency).ok_or_else(|| {
            CoinGeckoError::Malformed(format!("no '{}' price in response", self.vs_currency))
        })?;
        let change_key = format!("{}_24h_change", self.vs_currency);
        let change_24h = *entry.get(&change_key).ok_or_else(|| {
            CoinGeckoError::Malformed(format!("no '{change_key}' field in response"))
        })?;

        Ok(SpotQuote { price, change_24h })
    }

    async fn fetch_market_chart(
        &self,
        days: u32,
        interval: Option<SampleInterval>,
    ) -> Result<Vec<PricePoint>, CoinGeckoError> {
        let url = self.market_chart_url(days, interval);
        tracing::debug!("Fetching market chart: {}", url);

        let response = self.get(&url).await?;
        let data: MarketChartResponse = response.json().await?;

        Ok(data
            .prices
            .into_iter()
            .map(|(time_ms, price)| PricePoint::new(time_ms as i64, price))
            .collect())
    }
}

#[async_trait]
impl PriceRepository for CoinGeckoRepository {
    async fn spot_quote(&self) -> anyhow::Result<SpotQuote> {
        Ok(self.fetch_spot().await?)
    }

    async fn market_chart(
        &self,
        days: u32,
        interval: Option<SampleInterval>,
    ) -> anyhow::Result<Vec<PricePoint>> {
        Ok(self.fetch_market_chart(days, interval).await?)
    }
}
