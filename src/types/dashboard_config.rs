use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::types::trading_calendar::TradingCalendar;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub calendar: TradingCalendar,
    pub refresh: RefreshSettings,
    pub news: NewsSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Polling period while the session is open.
    pub live_interval_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            live_interval_secs: 30,
        }
    }
}

impl RefreshSettings {
    pub fn live_interval(&self) -> Duration {
        Duration::from_secs(self.live_interval_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    /// Rows requested from the news store outside weekends.
    pub default_limit: usize,

    /// Rows requested while the market is closed for the weekend.
    pub weekend_limit: usize,

    /// Items shown in the live feed.
    pub feed_size: usize,

    /// Rows shown in the analysis table.
    pub analysis_size: usize,

    /// Hourly buckets in the sentiment trend.
    pub trend_hours: u32,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            default_limit: 20,
            weekend_limit: 15,
            feed_size: 6,
            analysis_size: 20,
            trend_hours: 8,
        }
    }
}

static CONFIG: OnceCell<DashboardConfig> = OnceCell::new();

impl DashboardConfig {
    pub const FILE_NAME: &'static str = "dashboard.yml";

    /// Loads the process-wide config once. A missing file falls back to defaults.
    pub fn load(path: &Path) -> Result<&'static DashboardConfig> {
        CONFIG.get_or_try_init(|| {
            if !path.exists() {
                tracing::info!(path = %path.display(), "no dashboard config found; using defaults");
                return Ok(DashboardConfig::default());
            }

            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read dashboard config {}", path.display()))?;

            Self::from_yaml_str(&raw)
                .with_context(|| format!("failed to load dashboard config {}", path.display()))
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_yaml::from_str(raw).context("failed to parse dashboard config")?;

        config
            .validate()
            .context("dashboard config validation failed")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.calendar
            .validate()
            .context("invalid calendar section")?;

        if self.refresh.live_interval_secs == 0 {
            bail!("refresh.live_interval_secs must be > 0");
        }
        if self.news.default_limit == 0 || self.news.weekend_limit == 0 {
            bail!("news limits must be > 0");
        }
        if self.news.trend_hours == 0 {
            bail!("news.trend_hours must be > 0");
        }
        Ok(())
    }
}
