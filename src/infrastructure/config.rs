use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub asset: String,
    pub vs_currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartConfig {
    #[serde(default)]
    pub series: ChartSeriesSettings,
}

/// Cosmetic settings fed through the view model to the chart widget.
#[derive(Debug, Deserialize, Clone)]
pub struct ChartSeriesSettings {
    #[serde(default = "default_series_label")]
    pub label: String,
    #[serde(default = "default_series_color")]
    pub color: String,
    #[serde(default = "default_series_fill_color")]
    pub fill_color: String,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_series_label() -> String {
    "Price (USD)".to_string()
}

fn default_series_color() -> String {
    "#4B40EE".to_string()
}

fn default_series_fill_color() -> String {
    "rgba(75, 64, 238, 0.2)".to_string()
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for ChartSeriesSettings {
    fn default() -> Self {
        Self {
            label: default_series_label(),
            color: default_series_color(),
            fill_color: default_series_fill_color(),
        }
    }
}

pub fn load_market_config() -> anyhow::Result<MarketConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/market"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/chart").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
