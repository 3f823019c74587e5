pub mod market_status;
pub mod news_filter;
pub mod news_window;
