// Market data domain models
use chrono::DateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub time_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(time_ms: i64, price: f64) -> Self {
        Self { time_ms, price }
    }
}

/// The most recently fetched spot price and its change percentage.
/// Replaced wholesale on every successful poll; both fields are absent
/// until the first poll lands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    pub spot_price: Option<f64>,
    pub change_percent: Option<f64>,
}

impl PriceSnapshot {
    pub fn new(spot_price: f64, change_percent: f64) -> Self {
        Self {
            spot_price: Some(spot_price),
            change_percent: Some(change_percent),
        }
    }
}

/// Historical price points backing the chart, oldest first, with one
/// date label per point in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
    pub labels: Vec<String>,
}

impl PriceSeries {
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        let labels = points.iter().map(|p| date_label(p.time_ms)).collect();
        Self { points, labels }
    }
}

fn date_label(time_ms: i64) -> String {
    DateTime::from_timestamp_millis(time_ms)
        .map(|t| t.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}
