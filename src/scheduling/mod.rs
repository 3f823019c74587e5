pub mod phase_tracker;
pub mod policies;
pub mod refresh_scheduler;
pub mod schedule_context;
pub mod schedule_policy;
pub mod types;
