use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Timelike};
use serde::Serialize;

use crate::types::news_item::NewsItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Local "HH:00" label of the bucket start.
    pub time: String,
    pub sentiment: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub sentiment: f64,
    pub count: usize,
}

/// Mean score per clock hour for the last `hours` hours, oldest first.
/// The newest bucket is the (partial) hour containing `now`; empty buckets report 0.
pub fn hourly_trend(
    now: &DateTime<FixedOffset>,
    items: &[NewsItem],
    hours: u32,
) -> Vec<TrendPoint> {
    let current_hour = truncate_to_hour(now);
    let offset = *now.offset();

    (0..hours)
        .rev()
        .map(|hours_back| {
            let start = current_hour - TimeDelta::hours(hours_back.into());
            let end = start + TimeDelta::hours(1);

            let scores: Vec<f64> = items
                .iter()
                .filter(|item| {
                    let published = item.published_at.with_timezone(&offset);
                    published >= start && published < end
                })
                .filter_map(|item| item.sentiment_score)
                .collect();

            TrendPoint {
                time: start.format("%H:00").to_string(),
                sentiment: mean(&scores),
                count: scores.len(),
            }
        })
        .collect()
}

/// Mean score per exchange-local calendar date, ascending. Unscored items are skipped.
pub fn daily_trend(items: &[NewsItem], offset: FixedOffset) -> Vec<DailySentiment> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for item in items {
        if let Some(score) = item.sentiment_score {
            let date = item.published_at.with_timezone(&offset).date_naive();
            by_date.entry(date).or_default().push(score);
        }
    }

    by_date
        .into_iter()
        .map(|(date, scores)| DailySentiment {
            date,
            sentiment: mean(&scores),
            count: scores.len(),
        })
        .collect()
}

fn truncate_to_hour(instant: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let past_hour = instant.num_seconds_from_midnight() % 3600;

    *instant
        - TimeDelta::seconds(past_hour.into())
        - TimeDelta::nanoseconds(instant.nanosecond().into())
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
