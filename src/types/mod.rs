pub mod dashboard_config;
pub mod market_phase;
pub mod news_item;
pub mod trading_calendar;
