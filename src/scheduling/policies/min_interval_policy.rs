use std::time::{Duration, Instant};

use crate::scheduling::{
    schedule_context::ScheduleContext, schedule_policy::RefreshPolicy, types::SkipReason,
};

pub struct MinIntervalPolicy {
    min_interval: Duration,
    last_refresh: Option<Instant>,
}

impl MinIntervalPolicy {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_refresh: None,
        }
    }
}

impl RefreshPolicy for MinIntervalPolicy {
    fn should_refresh(&mut self, ctx: &ScheduleContext<'_>) -> Option<SkipReason> {
        if let Some(last) = self.last_refresh {
            let duration_since_last = ctx.now.saturating_duration_since(last);
            if duration_since_last < self.min_interval {
                return Some(SkipReason::TooSoon {
                    duration_since_last,
                });
            }
        }

        self.last_refresh = Some(ctx.now);

        None
    }
}
