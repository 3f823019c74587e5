use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}
