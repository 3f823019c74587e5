pub mod market_hours_policy;
pub mod min_interval_policy;
