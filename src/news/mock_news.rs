use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::market::news_window::NewsWindow;
use crate::news::NewsSource;
use crate::sentiment::sentiment_label::SentimentLabel;
use crate::types::news_item::NewsItem;

const TEMPLATES: &[&str] = &[
    "SENSEX {action} {points} points on {reason}",
    "Nifty {sector} index {action} {percentage}% on {reason}",
    "{company} stocks {action} amid {reason}",
    "FII {action} {amount} crore in {month}",
    "{sector} sector shows {sentiment} trends on {reason}",
];

const ACTIONS: &[&str] = &["gains", "rallies", "surges", "declines", "drops", "falls"];
const SECTORS: &[&str] = &["IT", "Banking", "Auto", "Pharma", "FMCG", "Energy"];
const COMPANIES: &[&str] = &["TCS", "Infosys", "HDFC Bank", "Reliance", "ICICI Bank", "SBI"];
const REASONS: &[&str] = &[
    "strong earnings",
    "global optimism",
    "policy concerns",
    "market volatility",
    "sector rotation",
    "overnight cues from US markets",
    "quarterly results",
];
const SOURCES: &[&str] = &[
    "MoneyControl",
    "Economic Times",
    "Business Standard",
    "Mint",
    "Business Today",
];
const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Lookback used when the window has no lower bound.
const DEFAULT_LOOKBACK_HOURS: i64 = 8;

/// Generates plausible scored headlines when no news store is reachable.
pub struct MockNews {
    rng: Mutex<StdRng>,
}

impl Default for MockNews {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl MockNews {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// `window.limit` items published inside the window up to `window.as_of`, newest first.
    pub fn generate(&self, window: &NewsWindow) -> Result<Vec<NewsItem>> {
        let now = window.as_of.with_timezone(&Utc);
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow!("mock news rng poisoned"))?;

        let since = window
            .since
            .map(|since| since.with_timezone(&Utc))
            .filter(|since| *since < now)
            .unwrap_or(now - TimeDelta::hours(DEFAULT_LOOKBACK_HOURS));
        let span_seconds = (now - since).num_seconds().max(1);

        let mut items: Vec<NewsItem> = (0..window.limit)
            .map(|_| {
                let published_at = now - TimeDelta::seconds(rng.random_range(0..span_seconds));
                random_item(&mut *rng, published_at)
            })
            .collect();

        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(items)
    }
}

#[async_trait]
impl NewsSource for MockNews {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, window: &NewsWindow) -> Result<Vec<NewsItem>> {
        let items = self.generate(window)?;
        tracing::debug!(count = items.len(), "generated mock news");

        Ok(items)
    }
}

fn random_item<R: Rng + ?Sized>(rng: &mut R, published_at: DateTime<Utc>) -> NewsItem {
    let action = pick(rng, ACTIONS);
    let is_positive = ["gain", "rall", "surg"]
        .iter()
        .any(|stem| action.contains(stem));

    let headline = pick(rng, TEMPLATES)
        .replace("{action}", action)
        .replace("{sector}", pick(rng, SECTORS))
        .replace("{company}", pick(rng, COMPANIES))
        .replace("{reason}", pick(rng, REASONS))
        .replace("{points}", &rng.random_range(50..550).to_string())
        .replace("{percentage}", &format!("{:.1}", rng.random_range(0.5..5.5)))
        .replace("{amount}", &rng.random_range(1000..6000).to_string())
        .replace("{month}", MONTHS[published_at.month0() as usize])
        .replace(
            "{sentiment}",
            if rng.random_bool(0.5) { "positive" } else { "mixed" },
        );

    let magnitude = rng.random_range(0.2..1.0);
    let score = if is_positive { magnitude } else { -magnitude };

    let mut item = NewsItem::new(headline, published_at)
        .with_source(pick(rng, SOURCES))
        .with_score(score);
    item.sentiment_label = Some(SentimentLabel::from_score(score).to_string());
    item.impact_level = Some(if magnitude > 0.7 { "high" } else { "medium" }.to_string());

    item
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, choices: &'a [&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 12, 8, 0, 0).unwrap()
    }

    fn as_of() -> DateTime<FixedOffset> {
        now().with_timezone(&FixedOffset::east_opt(19_800).unwrap())
    }

    #[test]
    fn fills_window_newest_first() {
        let since = FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 12, 9, 15, 0)
            .unwrap();
        let window = NewsWindow {
            as_of: as_of(),
            since: Some(since),
            limit: 12,
        };

        let items = MockNews::with_seed(7).generate(&window).unwrap();

        assert_eq!(items.len(), 12);
        assert!(items.windows(2).all(|pair| pair[0].published_at >= pair[1].published_at));
        assert!(items.iter().all(|item| item.published_at >= since && item.published_at <= now()));
    }

    #[test]
    fn scores_agree_with_headline_direction() {
        let items = MockNews::with_seed(11)
            .generate(&NewsWindow::unbounded(as_of(), 40))
            .unwrap();

        for item in &items {
            let score = item.sentiment_score.unwrap();
            assert!((0.2..1.0).contains(&score.abs()), "score {score} out of range");
            assert!(!item.title.contains('{'), "unfilled template: {}", item.title);
            assert_eq!(
                item.sentiment_label.as_deref(),
                Some(SentimentLabel::from_score(score).to_string().as_str())
            );
        }
    }

    #[test]
    fn same_seed_generates_same_batch() {
        let window = NewsWindow::unbounded(as_of(), 5);

        let first = MockNews::with_seed(3).generate(&window).unwrap();
        let second = MockNews::with_seed(3).generate(&window).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fetch_respects_limit_and_window_instant() {
        let window = NewsWindow::unbounded(as_of(), 3);

        let items = MockNews::default().fetch(&window).await.unwrap();

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.published_at <= now()));
        assert!(
            items
                .iter()
                .all(|item| item.published_at >= now() - TimeDelta::hours(DEFAULT_LOOKBACK_HOURS))
        );
    }
}
