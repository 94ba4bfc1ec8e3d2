// Mapper from domain state to the wire view model
use serde::Serialize;

use crate::domain::dashboard::{DashboardView, Section};
use crate::domain::market::{PriceSeries, PriceSnapshot};
use crate::domain::timeframe::Timeframe;
use crate::infrastructure::config::ChartSeriesSettings;

pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// The full dashboard view as consumed by the rendering surface.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPayload {
    pub price_text: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_color: Option<&'static str>,
    pub timeframe: Timeframe,
    pub section: Section,
    pub chart: ChartPayload,
}

/// Header fields alone, pushed when only the snapshot slot changed.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPayload {
    pub price_text: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_color: Option<&'static str>,
}

/// The chart's backing data plus its cosmetic settings.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub label: String,
    pub color: String,
    pub fill_color: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    View,
    SnapshotUpdate,
    ChartUpdate,
    TimeframeUpdate,
    SectionUpdate,
}

/// One message on the dashboard update stream: a kind plus the matching
/// payload field.
#[derive(Debug, Clone, Serialize)]
pub struct StreamEnvelope {
    pub kind: StreamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
}

impl StreamEnvelope {
    fn empty(kind: StreamKind) -> Self {
        Self {
            kind,
            view: None,
            snapshot: None,
            chart: None,
            timeframe: None,
            section: None,
        }
    }
}

/// Selectable timeframe as listed to the period selector.
#[derive(Debug, Clone, Serialize)]
pub struct TimeframeOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub fn timeframe_options() -> Vec<TimeframeOption> {
    Timeframe::ALL
        .iter()
        .map(|tf| TimeframeOption {
            id: tf.as_str(),
            label: tf.label(),
        })
        .collect()
}

pub fn view_payload(
    view: &DashboardView,
    unit: &str,
    chart: &ChartSeriesSettings,
) -> ViewPayload {
    let snapshot = snapshot_payload(&view.snapshot, unit);
    ViewPayload {
        price_text: snapshot.price_text,
        unit: snapshot.unit,
        change_text: snapshot.change_text,
        change_color: snapshot.change_color,
        timeframe: view.timeframe,
        section: view.section,
        chart: chart_payload(&view.series, chart),
    }
}

pub fn snapshot_payload(snapshot: &PriceSnapshot, unit: &str) -> SnapshotPayload {
    let price_text = snapshot
        .spot_price
        .map(format_grouped)
        .unwrap_or_else(|| LOADING_PLACEHOLDER.to_string());

    let (change_text, change_color) = match (snapshot.spot_price, snapshot.change_percent) {
        (Some(price), Some(change)) => (
            Some(format_change_line(price, change)),
            Some(change_color(change)),
        ),
        _ => (None, None),
    };

    SnapshotPayload {
        price_text,
        unit: unit.to_string(),
        change_text,
        change_color,
    }
}

pub fn chart_payload(series: &PriceSeries, chart: &ChartSeriesSettings) -> ChartPayload {
    ChartPayload {
        label: chart.label.clone(),
        color: chart.color.clone(),
        fill_color: chart.fill_color.clone(),
        labels: series.labels.clone(),
        values: series.points.iter().map(|p| p.price).collect(),
    }
}

pub fn full_view_envelope(
    view: &DashboardView,
    unit: &str,
    chart: &ChartSeriesSettings,
) -> StreamEnvelope {
    StreamEnvelope {
        view: Some(view_payload(view, unit, chart)),
        ..StreamEnvelope::empty(StreamKind::View)
    }
}

pub fn snapshot_envelope(snapshot: &PriceSnapshot, unit: &str) -> StreamEnvelope {
    StreamEnvelope {
        snapshot: Some(snapshot_payload(snapshot, unit)),
        ..StreamEnvelope::empty(StreamKind::SnapshotUpdate)
    }
}

pub fn chart_envelope(series: &PriceSeries, chart: &ChartSeriesSettings) -> StreamEnvelope {
    StreamEnvelope {
        chart: Some(chart_payload(series, chart)),
        ..StreamEnvelope::empty(StreamKind::ChartUpdate)
    }
}

pub fn timeframe_envelope(timeframe: Timeframe) -> StreamEnvelope {
    StreamEnvelope {
        timeframe: Some(timeframe),
        ..StreamEnvelope::empty(StreamKind::TimeframeUpdate)
    }
}

pub fn section_envelope(section: Section) -> StreamEnvelope {
    StreamEnvelope {
        section: Some(section),
        ..StreamEnvelope::empty(StreamKind::SectionUpdate)
    }
}

/// Thousands-grouped price text: `50000` -> "50,000". A non-integral
/// value keeps up to two fractional digits, trailing zeros trimmed.
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let abs = value.abs();
    let mut int_part = abs.trunc() as u64;
    let mut cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        int_part += 1;
        cents = 0;
    }

    let digits = int_part.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        out.push('-');
    }
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }

    if cents > 0 {
        if cents % 10 == 0 {
            out.push_str(&format!(".{}", cents / 10));
        } else {
            out.push_str(&format!(".{:02}", cents));
        }
    }

    out
}

/// Change line: sign, two-decimal percentage, and the absolute currency
/// delta, e.g. "+2.50% (+$1250.00)" or "-1.00% (-$500.00)".
pub fn format_change_line(price: f64, change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "-" };
    let delta = price * change / 100.0;
    format!(
        "{sign}{:.2}% ({sign}${:.2})",
        change.abs(),
        delta.abs()
    )
}

pub fn change_color(change: f64) -> &'static str {
    if change >= 0.0 { "green" } else { "red" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::PricePoint;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(50000.0), "50,000");
        assert_eq!(format_grouped(1_234_567.0), "1,234,567");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(50000.5), "50,000.5");
        assert_eq!(format_grouped(50000.25), "50,000.25");
        assert_eq!(format_grouped(0.0), "0");
    }

    #[test]
    fn test_change_line_positive() {
        assert_eq!(format_change_line(50000.0, 2.5), "+2.50% (+$1250.00)");
    }

    #[test]
    fn test_change_line_negative() {
        assert_eq!(format_change_line(50000.0, -1.0), "-1.00% (-$500.00)");
    }

    #[test]
    fn test_change_line_zero_counts_as_positive() {
        assert_eq!(format_change_line(50000.0, 0.0), "+0.00% (+$0.00)");
        assert_eq!(change_color(0.0), "green");
    }

    #[test]
    fn test_snapshot_payload_loading_placeholder() {
        let payload = snapshot_payload(&PriceSnapshot::default(), "USD");
        assert_eq!(payload.price_text, "Loading...");
        assert_eq!(payload.unit, "USD");
        assert!(payload.change_text.is_none());
        assert!(payload.change_color.is_none());
    }

    #[test]
    fn test_view_payload_end_to_end_positive() {
        let view = DashboardView::new(
            PriceSnapshot::new(50000.0, 2.5),
            PriceSeries::default(),
            Timeframe::OneDay,
            Section::Chart,
        );
        let payload = view_payload(&view, "USD", &ChartSeriesSettings::default());

        assert_eq!(payload.price_text, "50,000");
        assert_eq!(payload.unit, "USD");
        assert_eq!(payload.change_text.as_deref(), Some("+2.50% (+$1250.00)"));
        assert_eq!(payload.change_color, Some("green"));
    }

    #[test]
    fn test_view_payload_end_to_end_negative() {
        let view = DashboardView::new(
            PriceSnapshot::new(50000.0, -1.0),
            PriceSeries::default(),
            Timeframe::OneDay,
            Section::Chart,
        );
        let payload = view_payload(&view, "USD", &ChartSeriesSettings::default());

        assert_eq!(payload.change_text.as_deref(), Some("-1.00% (-$500.00)"));
        assert_eq!(payload.change_color, Some("red"));
    }

    #[test]
    fn test_chart_payload_keeps_point_order() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(1_700_000_000_000, 37000.0),
            PricePoint::new(1_700_086_400_000, 37500.0),
        ]);
        let payload = chart_payload(&series, &ChartSeriesSettings::default());

        assert_eq!(payload.labels, series.labels);
        assert_eq!(payload.values, vec![37000.0, 37500.0]);
        assert_eq!(payload.label, "Price (USD)");
        assert_eq!(payload.color, "#4B40EE");
    }

    #[test]
    fn test_timeframe_options_cover_every_window() {
        let options = timeframe_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].id, "1d");
        assert_eq!(options[0].label, "1D");
        assert_eq!(options[6].id, "max");
        assert_eq!(options[6].label, "MAX");
    }
}
