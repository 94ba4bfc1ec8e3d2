// History service - Use cases for the historical series and change window
use std::sync::Arc;

use crate::application::market_state::MarketState;
use crate::application::price_repository::PriceRepository;
use crate::domain::market::PriceSeries;
use crate::domain::timeframe::{SampleInterval, Timeframe};

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn PriceRepository>,
    state: Arc<MarketState>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn PriceRepository>, state: Arc<MarketState>) -> Self {
        Self { repository, state }
    }

    /// Percentage change between the first and last point of the
    /// timeframe's lookback window. Any fetch failure (including an empty
    /// series) yields a neutral 0, never an error.
    pub async fn change_over_window(&self, timeframe: Timeframe) -> f64 {
        let days = timeframe.change_lookback_days();
        match self.repository.market_chart(days, None).await {
            Ok(points) => match (points.first(), points.last()) {
                (Some(first), Some(last)) => (last.price - first.price) / first.price * 100.0,
                _ => 0.0,
            },
            Err(e) => {
                tracing::error!("Error fetching historical price change: {e:#}");
                0.0
            }
        }
    }

    /// Fetch the chart series for the timeframe and replace the series
    /// slot wholesale. A failed fetch leaves the previous series in place.
    pub async fn fetch_series(&self, timeframe: Timeframe) {
        let days = timeframe.chart_lookback_days();
        match self
            .repository
            .market_chart(days, Some(SampleInterval::Daily))
            .await
        {
            Ok(points) => {
                tracing::debug!(
                    "Fetched {} points for timeframe {}",
                    points.len(),
                    timeframe.as_str()
                );
                self.state.set_series(PriceSeries::from_points(points)).await;
            }
            Err(e) => {
                tracing::error!("Error fetching historical data: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::price_repository::mock::MockPriceRepository;
    use crate::domain::market::PricePoint;

    const DAY_MS: i64 = 86_400_000;

    fn daily_points(start_price: f64, step: f64, count: usize) -> Vec<PricePoint> {
        (0..count)
            .map(|i| PricePoint::new(1_704_067_200_000 + i as i64 * DAY_MS, start_price + step * i as f64))
            .collect()
    }

    fn service(
        repository: MockPriceRepository,
    ) -> (HistoryService, Arc<MarketState>, Arc<MockPriceRepository>) {
        let state = Arc::new(MarketState::new());
        let repository = Arc::new(repository);
        (
            HistoryService::new(repository.clone(), state.clone()),
            state,
            repository,
        )
    }

    #[tokio::test]
    async fn test_change_over_window_first_to_last() {
        let points = vec![
            PricePoint::new(0, 40000.0),
            PricePoint::new(DAY_MS, 41000.0),
            PricePoint::new(2 * DAY_MS, 44000.0),
        ];
        let (service, _, _) = service(MockPriceRepository::with_chart(points));

        let change = service.change_over_window(Timeframe::OneWeek).await;
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_change_is_zero_on_fetch_error_for_all_timeframes() {
        let (service, _, _) = service(MockPriceRepository::failing());
        for tf in Timeframe::ALL {
            assert_eq!(service.change_over_window(tf).await, 0.0);
        }
    }

    #[tokio::test]
    async fn test_change_edge_cases_pinned() {
        // A single point: first and last coincide, change is exactly 0.
        {
            let (service, _, _) = service(MockPriceRepository::with_chart(vec![PricePoint::new(
                0, 50000.0,
            )]));
            assert_eq!(service.change_over_window(Timeframe::OneMonth).await, 0.0);
        }

        // An empty series falls into the same neutral default.
        let (service, _, _) = service(MockPriceRepository::with_chart(Vec::new()));
        assert_eq!(service.change_over_window(Timeframe::OneMonth).await, 0.0);
    }

    #[tokio::test]
    async fn test_change_uses_change_lookback_table() {
        let (service, _, mock) =
            service(MockPriceRepository::with_chart(daily_points(100.0, 1.0, 2)));

        service.change_over_window(Timeframe::ThreeDays).await;

        // 3d has no change-table entry and falls back to 1 day, with no
        // sampling interval on the change fetch.
        let requests = mock.chart_requests.lock().unwrap();
        assert_eq!(requests.as_slice(), &[(1, None)]);
    }

    #[tokio::test]
    async fn test_fetch_series_replaces_slot() {
        let points = daily_points(30000.0, 100.0, 30);
        let (service, state, _) = service(MockPriceRepository::with_chart(points.clone()));

        service.fetch_series(Timeframe::OneMonth).await;

        let series = state.series().await;
        assert_eq!(series.points.len(), 30);
        assert_eq!(series.labels.len(), 30);
        assert_eq!(series.points, points);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_previous_series() {
        let initial = PriceSeries::from_points(daily_points(30000.0, 100.0, 7));
        let (service, state, _) = service(MockPriceRepository::failing());
        state.set_series(initial.clone()).await;

        service.fetch_series(Timeframe::OneWeek).await;

        assert_eq!(state.series().await, initial);
    }

    #[tokio::test]
    async fn test_series_fetch_requests_daily_interval() {
        let (service, _, mock) =
            service(MockPriceRepository::with_chart(daily_points(100.0, 1.0, 3)));

        service.fetch_series(Timeframe::ThreeDays).await;

        let requests = mock.chart_requests.lock().unwrap();
        assert_eq!(requests.as_slice(), &[(3, Some(SampleInterval::Daily))]);
    }
}
