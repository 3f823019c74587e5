use std::fmt;

use serde::Serialize;

use crate::sentiment::sentiment_label::SentimentLabel;
use crate::types::news_item::NewsItem;

const MIN_CONFIDENCE: f64 = 50.0;
const MAX_CONFIDENCE: f64 = 95.0;
const UP_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prediction {
    Up,
    Down,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// Headline gauges derived from one batch of scored news.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentMetrics {
    /// Mean score scaled to -100..=100.
    pub overall_sentiment: f64,
    pub bullish_percentage: u32,
    pub bearish_percentage: u32,
    pub neutral_percentage: u32,
    pub total_articles: usize,
    pub prediction_confidence: f64,
    pub prediction: Prediction,
}

impl SentimentMetrics {
    /// Items without a score count towards `total_articles` only.
    pub fn from_news(items: &[NewsItem]) -> Option<Self> {
        let scores: Vec<f64> = items
            .iter()
            .filter_map(|item| item.sentiment_score)
            .filter(|score| score.is_finite())
            .collect();

        if scores.is_empty() {
            return None;
        }

        let scored = scores.len() as f64;
        let count = |label: SentimentLabel| {
            scores
                .iter()
                .filter(|score| SentimentLabel::from_score(**score) == label)
                .count() as f64
        };

        let positive = count(SentimentLabel::Positive);
        let negative = count(SentimentLabel::Negative);
        let neutral = scored - positive - negative;

        let overall_sentiment = scores.iter().sum::<f64>() / scored * 100.0;

        Some(Self {
            overall_sentiment,
            bullish_percentage: percentage(positive, scored),
            bearish_percentage: percentage(negative, scored),
            neutral_percentage: percentage(neutral, scored),
            total_articles: items.len(),
            prediction_confidence: overall_sentiment.abs().clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            prediction: if overall_sentiment > UP_THRESHOLD {
                Prediction::Up
            } else {
                Prediction::Down
            },
        })
    }
}

fn percentage(part: f64, whole: f64) -> u32 {
    (part / whole * 100.0).round() as u32
}
