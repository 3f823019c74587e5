pub mod analysis_filter;
pub mod snapshot;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use tracing::{info, warn};

use crate::dashboard::analysis_filter::AnalysisFilter;
use crate::dashboard::snapshot::{DashboardSnapshot, SnapshotInput};
use crate::market::market_status::MarketStatusService;
use crate::market::news_window::NewsWindow;
use crate::news::mock_news::MockNews;
use crate::scenario::scenario::DynamicNewsSource;
use crate::types::dashboard_config::DashboardConfig;

/// Fetches news for the current phase and assembles a snapshot, falling back
/// to generated headlines when the configured source fails or comes back empty.
pub struct Dashboard {
    service: MarketStatusService,
    source: DynamicNewsSource,
    fallback: MockNews,
    config: DashboardConfig,
    analysis_filter: AnalysisFilter,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, source: DynamicNewsSource) -> Result<Self> {
        let service = MarketStatusService::new(config.calendar.clone())?;

        Ok(Self {
            service,
            source,
            fallback: MockNews::default(),
            config,
            analysis_filter: AnalysisFilter::default(),
        })
    }

    pub fn with_analysis_filter(mut self, analysis_filter: AnalysisFilter) -> Self {
        self.analysis_filter = analysis_filter;
        self
    }

    pub fn service(&self) -> &MarketStatusService {
        &self.service
    }

    pub async fn refresh(&self, now: DateTime<FixedOffset>) -> Result<DashboardSnapshot> {
        let window = NewsWindow::for_phase(&self.service, &now, &self.config.news);

        let (mut items, data_source) = match self.source.fetch(&window).await {
            Ok(items) if !items.is_empty() => (items, self.source.name()),
            Ok(_) => {
                info!(
                    source = self.source.name(),
                    "news source returned no rows; using mock data"
                );
                (self.fallback.generate(&window)?, self.fallback_name())
            }
            Err(error) => {
                warn!(source = self.source.name(), ?error, "news fetch failed; using mock data");
                (self.fallback.generate(&window)?, self.fallback_name())
            }
        };

        items.retain(|item| window.contains(&item.published_at));

        Ok(DashboardSnapshot::build(
            &self.service,
            SnapshotInput {
                now,
                window,
                items,
                data_source,
                news: &self.config.news,
                refresh: &self.config.refresh,
                analysis_filter: &self.analysis_filter,
            },
        ))
    }

    fn fallback_name(&self) -> &'static str {
        "mock-fallback"
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::news::NewsSource;
    use crate::sentiment::sentiment_label::SentimentLabel;
    use crate::types::market_phase::MarketStatus;
    use crate::types::news_item::NewsItem;

    struct FailingSource;

    #[async_trait]
    impl NewsSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _window: &NewsWindow) -> Result<Vec<NewsItem>> {
            Err(anyhow!("connection refused"))
        }
    }

    struct EmptySource;

    #[async_trait]
    impl NewsSource for EmptySource {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn fetch(&self, _window: &NewsWindow) -> Result<Vec<NewsItem>> {
            Ok(Vec::new())
        }
    }

    fn monday_noon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 12, 12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn falls_back_to_mock_news_on_fetch_error() {
        let dashboard =
            Dashboard::new(DashboardConfig::default(), Box::new(FailingSource)).unwrap();

        let snapshot = dashboard.refresh(monday_noon()).await.unwrap();

        assert_eq!(snapshot.data_source, "mock-fallback");
        assert_eq!(snapshot.phase.status, MarketStatus::Open);
        assert_eq!(snapshot.feed.len(), 6);
        assert_eq!(snapshot.analysis.len(), 20);
        assert!(snapshot.analysis.iter().any(|row| row.age != "0m ago"));
        assert!(
            snapshot
                .feed
                .iter()
                .all(|entry| entry.published_at <= monday_noon())
        );
    }

    #[tokio::test]
    async fn falls_back_to_mock_news_on_empty_fetch() {
        let dashboard = Dashboard::new(DashboardConfig::default(), Box::new(EmptySource)).unwrap();

        let snapshot = dashboard.refresh(monday_noon()).await.unwrap();

        assert_eq!(snapshot.data_source, "mock-fallback");
        assert!(!snapshot.feed.is_empty());
    }

    #[tokio::test]
    async fn uses_configured_source_when_it_has_rows() {
        let dashboard =
            Dashboard::new(DashboardConfig::default(), Box::new(MockNews::with_seed(1))).unwrap();

        let snapshot = dashboard.refresh(monday_noon()).await.unwrap();

        assert_eq!(snapshot.data_source, "mock");
        assert_eq!(snapshot.window.since, None);
        assert_eq!(snapshot.window.as_of, monday_noon());
    }

    #[tokio::test]
    async fn applies_analysis_filter_to_table_only() {
        let filter = AnalysisFilter::new(Some(SentimentLabel::Negative), None);
        let dashboard =
            Dashboard::new(DashboardConfig::default(), Box::new(MockNews::with_seed(7)))
                .unwrap()
                .with_analysis_filter(filter.clone());

        let snapshot = dashboard.refresh(monday_noon()).await.unwrap();

        assert_eq!(snapshot.analysis_filter, filter);
        assert_eq!(snapshot.feed.len(), 6);
        assert!(
            snapshot
                .analysis
                .iter()
                .all(|row| row.sentiment == Some(SentimentLabel::Negative))
        );
        assert!(!snapshot.sources.is_empty());
    }
}
