use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    Open,
    ClosedWeekend,
    PreMarket,
    AfterHours,
}

impl MarketStatus {
    pub fn badge(self) -> &'static str {
        match self {
            Self::Open => "🟢",
            Self::ClosedWeekend => "🔴",
            Self::PreMarket | Self::AfterHours => "🟡",
        }
    }

    pub fn data_context(self) -> DataContext {
        match self {
            Self::Open => DataContext::RealTime,
            Self::ClosedWeekend => DataContext::LastTradingDay,
            Self::PreMarket => DataContext::PreMarketNews,
            Self::AfterHours => DataContext::ClosingSummary,
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::ClosedWeekend => write!(f, "CLOSED_WEEKEND"),
            Self::PreMarket => write!(f, "PRE_MARKET"),
            Self::AfterHours => write!(f, "AFTER_HOURS"),
        }
    }
}

/// Freshness of the news shown alongside a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataContext {
    #[serde(rename = "Real-time")]
    RealTime,
    #[serde(rename = "Last Trading Day")]
    LastTradingDay,
    #[serde(rename = "Pre-Market News")]
    PreMarketNews,
    #[serde(rename = "Closing Summary")]
    ClosingSummary,
}

impl DataContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::RealTime => "Real-time",
            Self::LastTradingDay => "Last Trading Day",
            Self::PreMarketNews => "Pre-Market News",
            Self::ClosingSummary => "Closing Summary",
        }
    }
}

impl fmt::Display for DataContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketPhase {
    pub status: MarketStatus,
    pub message: &'static str,
    pub description: String,
    pub show_live_data: bool,
    pub data_context: DataContext,

    /// Absent while the session is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open: Option<DateTime<FixedOffset>>,
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.status.badge(), self.message, self.data_context)
    }
}
