use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `market_news` table. The sentiment fields are owned by the
/// ingestion pipeline and read as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(alias = "headline")]
    pub title: String,

    #[serde(default)]
    pub source: Option<String>,

    pub published_at: DateTime<Utc>,

    #[serde(default)]
    pub sentiment_score: Option<f64>,

    #[serde(default)]
    pub sentiment_label: Option<String>,

    #[serde(default)]
    pub impact_level: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            source: None,
            published_at,
            sentiment_score: None,
            sentiment_label: None,
            impact_level: None,
            url: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    pub fn headline(&self) -> &str {
        &self.title
    }
}
