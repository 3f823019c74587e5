use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::dashboard::analysis_filter::AnalysisFilter;
use crate::market::market_status::MarketStatusService;
use crate::market::news_window::NewsWindow;
use crate::sentiment::sentiment_label::SentimentLabel;
use crate::sentiment::sentiment_metrics::SentimentMetrics;
use crate::sentiment::sentiment_trend::{self, DailySentiment, TrendPoint};
use crate::types::dashboard_config::{NewsSettings, RefreshSettings};
use crate::types::market_phase::{MarketPhase, MarketStatus};
use crate::types::news_item::NewsItem;

const WEEKEND_NOTICE: &str = "Weekend market closure - showing last trading day data";
const NO_NEWS_NOTICE: &str = "No recent news available - check back during market hours";
const NO_MATCHING_ROWS: &str = "No data matches the selected filters";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub headline: String,
    pub source: Option<String>,
    pub published_at: DateTime<Utc>,
    pub age: String,
    pub sentiment: Option<SentimentLabel>,
    pub impact: String,
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
    pub age: String,
    pub headline: String,
    pub source: Option<String>,
    pub sentiment: Option<SentimentLabel>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub name: String,
    pub count: usize,
}

/// Everything one render cycle of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<FixedOffset>,
    pub phase: MarketPhase,
    pub last_trading_day: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_until_open: Option<String>,
    pub auto_refresh: String,
    pub window: NewsWindow,
    pub data_source: &'static str,
    pub feed: Vec<FeedEntry>,
    pub analysis: Vec<AnalysisRow>,
    pub analysis_filter: AnalysisFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_notice: Option<String>,
    pub sources: Vec<SourceCount>,
    pub metrics: Option<SentimentMetrics>,
    pub trend: Vec<TrendPoint>,
    pub daily: Vec<DailySentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub struct SnapshotInput<'a> {
    pub now: DateTime<FixedOffset>,
    pub window: NewsWindow,
    pub items: Vec<NewsItem>,
    pub data_source: &'static str,
    pub news: &'a NewsSettings,
    pub refresh: &'a RefreshSettings,
    pub analysis_filter: &'a AnalysisFilter,
}

impl DashboardSnapshot {
    pub fn build(service: &MarketStatusService, input: SnapshotInput<'_>) -> Self {
        let SnapshotInput {
            now,
            window,
            items,
            data_source,
            news,
            refresh,
            analysis_filter,
        } = input;

        let phase = service.classify(&now);
        let filtered = service.filter_for_phase(&phase, items);

        let notice = filtered.is_empty().then(|| no_data_notice(phase.status).to_string());

        let feed = filtered
            .iter()
            .take(news.feed_size)
            .map(|item| FeedEntry {
                headline: item.title.clone(),
                source: item.source.clone(),
                published_at: item.published_at,
                age: age_label(&now, &item.published_at),
                sentiment: item.sentiment_score.map(SentimentLabel::from_score),
                impact: item
                    .impact_level
                    .clone()
                    .unwrap_or_else(|| "medium".to_string()),
                is_live: phase.show_live_data,
            })
            .collect();

        let rows: Vec<AnalysisRow> = filtered
            .iter()
            .take(news.analysis_size)
            .map(|item| AnalysisRow {
                age: age_label(&now, &item.published_at),
                headline: item.title.clone(),
                source: item.source.clone(),
                sentiment: item.sentiment_score.map(SentimentLabel::from_score),
                score: item.sentiment_score,
            })
            .collect();

        let had_rows = !rows.is_empty();
        let analysis = analysis_filter.apply(rows);
        let analysis_notice =
            (had_rows && analysis.is_empty()).then(|| NO_MATCHING_ROWS.to_string());

        let auto_refresh = if phase.show_live_data {
            format!("Auto-refresh ON ({}s)", refresh.live_interval_secs)
        } else {
            "Auto-refresh OFF (Market Closed)".to_string()
        };

        Self {
            generated_at: now,
            last_trading_day: service.last_completed_session_date(&now),
            time_until_open: (!phase.show_live_data)
                .then(|| service.time_until_next_open(&now).to_string()),
            auto_refresh,
            window,
            data_source,
            feed,
            analysis,
            analysis_filter: analysis_filter.clone(),
            analysis_notice,
            sources: source_counts(&filtered),
            metrics: SentimentMetrics::from_news(&filtered),
            trend: sentiment_trend::hourly_trend(&now, &filtered, news.trend_hours),
            daily: sentiment_trend::daily_trend(&filtered, service.offset()),
            notice,
            phase,
        }
    }
}

/// Publishers of the shown news, busiest first, ties by name.
pub fn source_counts(items: &[NewsItem]) -> Vec<SourceCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for source in items.iter().filter_map(|item| item.source.as_deref()) {
        *counts.entry(source).or_default() += 1;
    }

    let mut sources: Vec<SourceCount> = counts
        .into_iter()
        .map(|(name, count)| SourceCount {
            name: name.to_string(),
            count,
        })
        .collect();
    sources.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    sources
}

fn no_data_notice(status: MarketStatus) -> &'static str {
    match status {
        MarketStatus::ClosedWeekend => WEEKEND_NOTICE,
        _ => NO_NEWS_NOTICE,
    }
}

/// "12m ago" under an hour, "3h ago" under a day, else "9 Aug 14:05" in exchange time.
pub fn age_label(now: &DateTime<FixedOffset>, published_at: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*published_at);
    let minutes = elapsed.num_minutes().max(0);

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        published_at
            .with_timezone(now.offset())
            .format("%-d %b %H:%M")
            .to_string()
    }
}
