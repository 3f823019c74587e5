pub mod sentiment_label;
pub mod sentiment_metrics;
pub mod sentiment_trend;
