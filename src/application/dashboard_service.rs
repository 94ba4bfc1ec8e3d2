// Dashboard service - Use case for the dashboard's UI events
use std::sync::Arc;

use crate::application::history_service::HistoryService;
use crate::application::market_state::MarketState;
use crate::application::poll_scheduler::PollScheduler;
use crate::application::quote_service::QuoteService;
use crate::domain::dashboard::{DashboardView, Section};
use crate::domain::timeframe::Timeframe;

#[derive(Clone)]
pub struct DashboardService {
    state: Arc<MarketState>,
    quote: QuoteService,
    history: HistoryService,
    scheduler: PollScheduler,
}

impl DashboardService {
    pub fn new(
        state: Arc<MarketState>,
        quote: QuoteService,
        history: HistoryService,
        scheduler: PollScheduler,
    ) -> Self {
        Self {
            state,
            quote,
            history,
            scheduler,
        }
    }

    pub async fn view(&self) -> DashboardView {
        self.state.view().await
    }

    /// Switch the visible content section. Never touches fetched data.
    pub async fn select_section(&self, section: Section) {
        self.state.set_section(section).await;
    }

    /// Switch the active timeframe: refresh the snapshot and the chart
    /// series concurrently (each fetch updates only its own slot, so a
    /// slow one never blocks the other) and re-arm the periodic poll with
    /// the new timeframe. In-flight fetches for the previous timeframe
    /// are not cancelled.
    pub async fn select_timeframe(&self, timeframe: Timeframe) {
        self.state.set_timeframe(timeframe).await;

        let quote = self.quote.clone();
        tokio::spawn(async move { quote.poll(timeframe).await });

        let history = self.history.clone();
        tokio::spawn(async move { history.fetch_series(timeframe).await });

        self.scheduler.arm(timeframe).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::price_repository::SpotQuote;
    use crate::application::price_repository::mock::MockPriceRepository;
    use crate::domain::market::PricePoint;

    fn service(
        repository: MockPriceRepository,
    ) -> (DashboardService, Arc<MarketState>, Arc<MockPriceRepository>) {
        let state = Arc::new(MarketState::new());
        let repository = Arc::new(repository);
        let history = HistoryService::new(repository.clone(), state.clone());
        let quote = QuoteService::new(repository.clone(), history.clone(), state.clone());
        let scheduler = PollScheduler::new(quote.clone(), Duration::from_secs(3600));
        (
            DashboardService::new(state.clone(), quote, history, scheduler),
            state,
            repository,
        )
    }

    async fn settle() {
        // Let the spawned fetch tasks run to completion.
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_timeframe_select_updates_change_and_series() {
        let points = vec![
            PricePoint::new(0, 40000.0),
            PricePoint::new(86_400_000, 42000.0),
            PricePoint::new(172_800_000, 44000.0),
        ];
        let (service, state, _) = service(MockPriceRepository::with_quote_and_chart(
            SpotQuote {
                price: 44000.0,
                change_24h: 1.0,
            },
            points,
        ));

        service.select_timeframe(Timeframe::OneWeek).await;
        settle().await;

        assert_eq!(state.timeframe().await, Timeframe::OneWeek);
        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.spot_price, Some(44000.0));
        assert!((snapshot.change_percent.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(state.series().await.points.len(), 3);
    }

    #[tokio::test]
    async fn test_section_select_never_fetches() {
        let (service, state, repository) = service(MockPriceRepository::failing());

        service.select_section(Section::Summary).await;
        service.select_section(Section::Settings).await;
        settle().await;

        assert_eq!(state.section().await, Section::Settings);
        assert_eq!(repository.total_calls(), 0);
    }
}
