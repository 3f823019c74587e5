use chrono::{DateTime, FixedOffset, NaiveTime, SecondsFormat, TimeZone};
use serde::Serialize;

use crate::market::market_status::MarketStatusService;
use crate::types::dashboard_config::NewsSettings;
use crate::types::market_phase::MarketStatus;

/// Lower bound and row cap for a news query, anchored at the render instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewsWindow {
    /// The instant the window was derived for; sources must not read the clock again.
    pub as_of: DateTime<FixedOffset>,
    pub since: Option<DateTime<FixedOffset>>,
    pub limit: usize,
}

impl NewsWindow {
    pub fn unbounded(as_of: DateTime<FixedOffset>, limit: usize) -> Self {
        Self {
            as_of,
            since: None,
            limit,
        }
    }

    /// Scope the news query to what is relevant for the phase at `now`.
    ///
    /// - weekend: everything since the start of the last trading day
    /// - pre-market: everything since the previous session closed
    /// - after hours: everything since midnight today
    /// - open: latest rows, no lower bound
    pub fn for_phase(
        service: &MarketStatusService,
        now: &DateTime<FixedOffset>,
        settings: &NewsSettings,
    ) -> Self {
        let local = service.to_local(now);

        match service.status(&local) {
            MarketStatus::ClosedWeekend => Self {
                as_of: local,
                since: Some(service.at_local(
                    service.last_completed_session_date(&local),
                    NaiveTime::MIN,
                )),
                limit: settings.weekend_limit,
            },
            MarketStatus::PreMarket => Self {
                as_of: local,
                since: Some(service.at_local(
                    service.last_completed_session_date(&local),
                    service.close_time(),
                )),
                limit: settings.default_limit,
            },
            MarketStatus::AfterHours => Self {
                as_of: local,
                since: Some(service.at_local(local.date_naive(), NaiveTime::MIN)),
                limit: settings.default_limit,
            },
            MarketStatus::Open => Self::unbounded(local, settings.default_limit),
        }
    }

    pub fn since_rfc3339(&self) -> Option<String> {
        self.since.map(|since| since.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        self.since.is_none_or(|since| *instant >= since)
    }
}
