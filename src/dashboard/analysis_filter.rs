use serde::Serialize;

use crate::dashboard::snapshot::AnalysisRow;
use crate::sentiment::sentiment_label::SentimentLabel;

/// Optional narrowing of the analysis table by sentiment and publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AnalysisFilter {
    pub fn new(sentiment: Option<SentimentLabel>, source: Option<String>) -> Self {
        Self { sentiment, source }
    }

    pub fn is_active(&self) -> bool {
        self.sentiment.is_some() || self.source.is_some()
    }

    /// Rows without a score never match a sentiment filter; publisher names compare
    /// case-insensitively.
    pub fn matches(&self, row: &AnalysisRow) -> bool {
        let sentiment_matches = self
            .sentiment
            .is_none_or(|wanted| row.sentiment == Some(wanted));

        let source_matches = self.source.as_deref().is_none_or(|wanted| {
            row.source
                .as_deref()
                .is_some_and(|source| source.eq_ignore_ascii_case(wanted))
        });

        sentiment_matches && source_matches
    }

    pub fn apply(&self, rows: Vec<AnalysisRow>) -> Vec<AnalysisRow> {
        if !self.is_active() {
            return rows;
        }

        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}
