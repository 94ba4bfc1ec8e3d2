// Poll scheduler - re-armable periodic spot price refresh
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::application::quote_service::QuoteService;
use crate::domain::timeframe::Timeframe;

/// Periodic poll task carrying its timeframe as an explicit parameter.
/// Re-arming aborts the previous task and starts a fresh one, so a stale
/// timeframe can never survive inside a long-lived closure.
#[derive(Clone)]
pub struct PollScheduler {
    quote: QuoteService,
    period: Duration,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PollScheduler {
    pub fn new(quote: QuoteService, period: Duration) -> Self {
        Self {
            quote,
            period,
            task: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn arm(&self, timeframe: Timeframe) {
        let mut slot = self.task.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let quote = self.quote.clone();
        let period = self.period;
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; the selection path has
            // already issued its own poll, so skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                quote.poll(timeframe).await;
            }
        }));

        tracing::info!(
            "Armed poll scheduler for timeframe {} (every {:?})",
            timeframe.as_str(),
            self.period
        );
    }
}
