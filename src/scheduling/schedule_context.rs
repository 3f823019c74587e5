use std::time::Instant;

use crate::types::market_phase::MarketPhase;

pub struct ScheduleContext<'a> {
    pub now: Instant,
    pub phase: &'a MarketPhase,
}
