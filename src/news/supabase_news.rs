use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::market::news_window::NewsWindow;
use crate::news::NewsSource;
use crate::news::supabase_config::SupabaseConfig;
use crate::types::news_item::NewsItem;

/// Reads scored headlines from a PostgREST `market_news` table.
#[derive(Clone, Debug)]
pub struct SupabaseNews {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseNews {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn query_url(&self, window: &NewsWindow) -> Result<Url> {
        let mut url = self
            .config
            .base_url
            .join(&format!("rest/v1/{}", self.config.table))
            .context("failed to build news table url")?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(since) = window.since_rfc3339() {
                query.append_pair("published_at", &format!("gte.{since}"));
            }
            query.append_pair("order", "published_at.desc");
            query.append_pair("limit", &window.limit.to_string());
        }

        Ok(url)
    }
}

#[async_trait]
impl NewsSource for SupabaseNews {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn fetch(&self, window: &NewsWindow) -> Result<Vec<NewsItem>> {
        let url = self.query_url(window)?;
        tracing::debug!(%url, "fetching news");

        let resp = self
            .http
            .get(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("supabase news GET failed")?;

        let status = resp.status();
        let text = resp.text().await.context("read response body failed")?;

        if !status.is_success() {
            anyhow::bail!("supabase http error {status}: {text}");
        }

        let items: Vec<NewsItem> =
            serde_json::from_str(&text).context("failed to parse market_news rows")?;

        tracing::info!(count = items.len(), "fetched news");

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;

    fn as_of() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 10, 12, 0, 0)
            .unwrap()
    }

    fn source() -> SupabaseNews {
        SupabaseNews::new(SupabaseConfig::new("https://demo.supabase.co", "anon").unwrap())
    }

    #[test]
    fn unbounded_query_orders_newest_first() {
        let url = source().query_url(&NewsWindow::unbounded(as_of(), 20)).unwrap();

        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/market_news?select=*&order=published_at.desc&limit=20"
        );
    }

    #[test]
    fn bounded_query_encodes_offset_timestamp() {
        let since = FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 9, 0, 0, 0)
            .unwrap();
        let window = NewsWindow {
            as_of: as_of(),
            since: Some(since),
            limit: 15,
        };

        let url = source().query_url(&window).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&(
            "published_at".to_string(),
            "gte.2024-08-09T00:00:00+05:30".to_string()
        )));
        assert!(pairs.contains(&("limit".to_string(), "15".to_string())));
        assert!(url.as_str().contains("%2B05%3A30"));
    }
}
