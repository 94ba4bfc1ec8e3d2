// Dashboard domain model
use serde::{Deserialize, Serialize};

use super::market::{PriceSeries, PriceSnapshot};
use super::timeframe::Timeframe;

/// Which content section of the dashboard is visible. Purely
/// presentational: switching sections never touches fetched data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Chart,
    Summary,
    Statistics,
    Analysis,
    Settings,
}

/// The assembled dashboard state: everything the rendering surface needs.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub snapshot: PriceSnapshot,
    pub series: PriceSeries,
    pub timeframe: Timeframe,
    pub section: Section,
}

impl DashboardView {
    pub fn new(
        snapshot: PriceSnapshot,
        series: PriceSeries,
        timeframe: Timeframe,
        section: Section,
    ) -> Self {
        Self {
            snapshot,
            series,
            timeframe,
            section,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_wire_names() {
        let section: Section = serde_json::from_str("\"statistics\"").unwrap();
        assert_eq!(section, Section::Statistics);
        assert_eq!(serde_json::to_string(&Section::Chart).unwrap(), "\"chart\"");
    }

    #[test]
    fn test_initial_section_is_chart() {
        assert_eq!(Section::default(), Section::Chart);
    }
}
