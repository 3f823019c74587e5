use crate::scheduling::{
    schedule_context::ScheduleContext, schedule_policy::RefreshPolicy, types::ScheduleDecision,
};

pub struct RefreshScheduler {
    policies: Vec<Box<dyn RefreshPolicy + Send>>,
}

impl RefreshScheduler {
    pub fn new(policies: Vec<Box<dyn RefreshPolicy + Send>>) -> Self {
        Self { policies }
    }

    pub fn decide(&mut self, context: &ScheduleContext<'_>) -> ScheduleDecision {
        for policy in self.policies.iter_mut() {
            if let Some(reason) = policy.should_refresh(context) {
                return ScheduleDecision::Skip(reason);
            }
        }

        ScheduleDecision::Refresh
    }
}
