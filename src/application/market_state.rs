// Named state slots backing the dashboard
use tokio::sync::{RwLock, broadcast};

use crate::domain::dashboard::{DashboardView, Section};
use crate::domain::market::{PriceSeries, PriceSnapshot};
use crate::domain::timeframe::Timeframe;

/// Which state slot changed. Carried on the broadcast channel so the
/// update stream can push the matching increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    Snapshot,
    Series,
    Timeframe,
    Section,
}

/// The dashboard's mutable state: one slot per concern, each written by
/// exactly one fetch path. Slots are replaced wholesale, never merged.
pub struct MarketState {
    snapshot: RwLock<PriceSnapshot>,
    series: RwLock<PriceSeries>,
    timeframe: RwLock<Timeframe>,
    section: RwLock<Section>,
    changes: broadcast::Sender<SlotChange>,
}

impl MarketState {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            snapshot: RwLock::new(PriceSnapshot::default()),
            series: RwLock::new(PriceSeries::default()),
            timeframe: RwLock::new(Timeframe::default()),
            section: RwLock::new(Section::default()),
            changes,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.changes.subscribe()
    }

    pub async fn snapshot(&self) -> PriceSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn series(&self) -> PriceSeries {
        self.series.read().await.clone()
    }

    pub async fn timeframe(&self) -> Timeframe {
        *self.timeframe.read().await
    }

    pub async fn section(&self) -> Section {
        *self.section.read().await
    }

    pub async fn view(&self) -> DashboardView {
        DashboardView::new(
            self.snapshot().await,
            self.series().await,
            self.timeframe().await,
            self.section().await,
        )
    }

    pub async fn set_snapshot(&self, snapshot: PriceSnapshot) {
        *self.snapshot.write().await = snapshot;
        self.notify(SlotChange::Snapshot);
    }

    pub async fn set_series(&self, series: PriceSeries) {
        *self.series.write().await = series;
        self.notify(SlotChange::Series);
    }

    pub async fn set_timeframe(&self, timeframe: Timeframe) {
        *self.timeframe.write().await = timeframe;
        self.notify(SlotChange::Timeframe);
    }

    pub async fn set_section(&self, section: Section) {
        *self.section.write().await = section;
        self.notify(SlotChange::Section);
    }

    fn notify(&self, change: SlotChange) {
        // No receivers is fine: nobody is watching the stream right now.
        let _ = self.changes.send(change);
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}
