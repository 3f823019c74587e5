use crate::scheduling::{
    schedule_context::ScheduleContext, schedule_policy::RefreshPolicy, types::SkipReason,
};

/// Only poll for news while the phase asks for live data.
pub struct MarketHoursPolicy;

impl RefreshPolicy for MarketHoursPolicy {
    fn should_refresh(&mut self, ctx: &ScheduleContext<'_>) -> Option<SkipReason> {
        if ctx.phase.show_live_data {
            return None;
        }

        Some(SkipReason::MarketClosed {
            status: ctx.phase.status,
        })
    }
}
