use std::time::Duration;

use crate::types::market_phase::MarketStatus;

#[derive(Debug, Clone, Copy)]
pub enum ScheduleDecision {
    Refresh,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy)]
pub enum SkipReason {
    TooSoon { duration_since_last: Duration },
    MarketClosed { status: MarketStatus },
}
