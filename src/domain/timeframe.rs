// Timeframe domain model - lookback windows selectable from the dashboard
use serde::{Deserialize, Serialize};

/// User-selected lookback window governing which historical range and
/// change baseline are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "max")]
    Max,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::OneDay,
        Timeframe::ThreeDays,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::ThreeDays => "3d",
            Timeframe::OneWeek => "1w",
            Timeframe::OneMonth => "1m",
            Timeframe::ThreeMonths => "3m",
            Timeframe::SixMonths => "6m",
            Timeframe::Max => "max",
        }
    }

    /// Display label for the period selector buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::ThreeDays => "3D",
            Timeframe::OneWeek => "1W",
            Timeframe::OneMonth => "1M",
            Timeframe::ThreeMonths => "3M",
            Timeframe::SixMonths => "6M",
            Timeframe::Max => "MAX",
        }
    }

    /// Lookback in days used when computing the change percentage over the
    /// window. ThreeDays intentionally falls back to one day here: the
    /// change baseline table has no three-day entry.
    pub fn change_lookback_days(&self) -> u32 {
        match self {
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::SixMonths => 180,
            Timeframe::Max => 1000,
            Timeframe::OneDay | Timeframe::ThreeDays => 1,
        }
    }

    /// Lookback in days used when fetching the chart series.
    pub fn chart_lookback_days(&self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::ThreeDays => 3,
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::SixMonths => 180,
            Timeframe::Max => 1000,
        }
    }
}

/// Sampling granularity requested from the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleInterval {
    Daily,
}

impl SampleInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleInterval::Daily => "daily",
        }
    }
}
