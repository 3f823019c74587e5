use crate::scheduling::{schedule_context::ScheduleContext, types::SkipReason};

pub trait RefreshPolicy {
    fn should_refresh(&mut self, ctx: &ScheduleContext<'_>) -> Option<SkipReason>;
}
