use std::fmt;

use anyhow::{Context, Result, anyhow};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc,
    Weekday,
};
use serde::Serialize;

use crate::market::news_filter;
use crate::types::market_phase::{DataContext, MarketPhase, MarketStatus};
use crate::types::news_item::NewsItem;
use crate::types::trading_calendar::TradingCalendar;

/// Classifies instants against a single daily session on a fixed-offset
/// exchange calendar. Weekends are the only closed days; holidays are not
/// modelled.
///
/// Every query takes the instant explicitly and converts it into the exchange
/// zone first, so callers should read the clock once via
/// [`MarketStatusService::current_local_time`] and reuse that value for all
/// lookups belonging to the same render cycle.
#[derive(Debug, Clone)]
pub struct MarketStatusService {
    calendar: TradingCalendar,
    offset: FixedOffset,
    open_time: NaiveTime,
    close_time: NaiveTime,
}

impl MarketStatusService {
    pub fn new(calendar: TradingCalendar) -> Result<Self> {
        calendar.validate().context("invalid trading calendar")?;

        let offset = calendar
            .utc_offset_seconds()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow!(
                    "unsupported utc offset of {} minutes",
                    calendar.utc_offset_minutes
                )
            })?;

        let open_time =
            NaiveTime::from_hms_opt(calendar.open_hour.into(), calendar.open_minute.into(), 0)
                .ok_or_else(|| anyhow!("invalid session open time"))?;

        let close_time =
            NaiveTime::from_hms_opt(calendar.close_hour.into(), calendar.close_minute.into(), 0)
                .ok_or_else(|| anyhow!("invalid session close time"))?;

        Ok(Self {
            calendar,
            offset,
            open_time,
            close_time,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn current_local_time(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn to_local<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    pub fn is_weekend<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        is_weekend_day(self.to_local(instant).weekday())
    }

    /// Both boundaries are inclusive at whole-second resolution.
    pub fn is_within_session_hours<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let local = self.to_local(instant);
        if is_weekend_day(local.weekday()) {
            return false;
        }

        let seconds = local.num_seconds_from_midnight();
        (self.calendar.open_seconds()..=self.calendar.close_seconds()).contains(&seconds)
    }

    pub fn status<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> MarketStatus {
        let local = self.to_local(instant);

        if self.is_weekend(&local) {
            return MarketStatus::ClosedWeekend;
        }
        if self.is_within_session_hours(&local) {
            return MarketStatus::Open;
        }
        if local.num_seconds_from_midnight() < self.calendar.open_seconds() {
            return MarketStatus::PreMarket;
        }

        MarketStatus::AfterHours
    }

    pub fn classify<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> MarketPhase {
        let local = self.to_local(instant);
        let status = self.status(&local);

        let next_open = match status {
            MarketStatus::Open => None,
            _ => Some(self.next_open_for(&local, status)),
        };

        MarketPhase {
            status,
            message: message_for(status),
            description: self.description_for(status),
            show_live_data: status == MarketStatus::Open,
            data_context: status.data_context(),
            next_open,
        }
    }

    /// Next session open, pinned to the configured open time-of-day.
    ///
    /// While the session is open this returns the following trading day's
    /// open rather than today's, which has already passed.
    pub fn next_session_open<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> DateTime<FixedOffset> {
        let local = self.to_local(instant);
        let status = self.status(&local);

        self.next_open_for(&local, status)
    }

    pub fn time_until_next_open<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> TimeUntilOpen {
        let local = self.to_local(instant);
        let next_open = self.next_session_open(&local);

        TimeUntilOpen::from_delta(next_open.signed_duration_since(local))
    }

    /// Most recent date whose session has fully concluded.
    ///
    /// While the session is open today's session is still running, so the
    /// previous trading day is returned.
    pub fn last_completed_session_date<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> NaiveDate {
        let local = self.to_local(instant);
        let today = local.date_naive();

        match self.status(&local) {
            MarketStatus::AfterHours => today,
            MarketStatus::ClosedWeekend | MarketStatus::PreMarket | MarketStatus::Open => {
                previous_weekday(today)
            }
        }
    }

    pub fn should_show_live_data<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        self.status(instant) == MarketStatus::Open
    }

    pub fn data_context<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> DataContext {
        self.status(instant).data_context()
    }

    pub fn filter_for_phase(&self, phase: &MarketPhase, items: Vec<NewsItem>) -> Vec<NewsItem> {
        news_filter::filter_for_status(phase.status, items)
    }

    /// Exchange-local wall time on `date`.
    pub fn at_local(&self, date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
        let utc = date.and_time(time) - TimeDelta::seconds(self.offset.local_minus_utc().into());
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }

    pub fn close_time(&self) -> NaiveTime {
        self.close_time
    }

    fn next_open_for(
        &self,
        local: &DateTime<FixedOffset>,
        status: MarketStatus,
    ) -> DateTime<FixedOffset> {
        let today = local.date_naive();

        let date = match status {
            MarketStatus::PreMarket => today,
            MarketStatus::ClosedWeekend | MarketStatus::Open | MarketStatus::AfterHours => {
                next_weekday(today)
            }
        };

        self.at_local(date, self.open_time)
    }

    fn description_for(&self, status: MarketStatus) -> String {
        let calendar = &self.calendar;

        match status {
            MarketStatus::Open => "Live trading in progress".to_string(),
            MarketStatus::ClosedWeekend => "Stock markets are closed on weekends".to_string(),
            MarketStatus::PreMarket => format!(
                "Market opens at {} {}",
                TradingCalendar::format_clock(calendar.open_hour, calendar.open_minute),
                calendar.zone_label
            ),
            MarketStatus::AfterHours => format!(
                "Market closed at {} {}",
                TradingCalendar::format_clock(calendar.close_hour, calendar.close_minute),
                calendar.zone_label
            ),
        }
    }
}

fn message_for(status: MarketStatus) -> &'static str {
    match status {
        MarketStatus::Open => "Market Open",
        MarketStatus::ClosedWeekend => "Market Closed - Weekend",
        MarketStatus::PreMarket => "Pre-Market",
        MarketStatus::AfterHours => "After Hours",
    }
}

fn is_weekend_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn next_weekday(date: NaiveDate) -> NaiveDate {
    let next = date + TimeDelta::days(1);
    match next.weekday() {
        Weekday::Sat => next + TimeDelta::days(2),
        Weekday::Sun => next + TimeDelta::days(1),
        _ => next,
    }
}

fn previous_weekday(date: NaiveDate) -> NaiveDate {
    let previous = date - TimeDelta::days(1);
    match previous.weekday() {
        Weekday::Sun => previous - TimeDelta::days(2),
        Weekday::Sat => previous - TimeDelta::days(1),
        _ => previous,
    }
}

/// Countdown to the next open, broken down for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeUntilOpen {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl TimeUntilOpen {
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total_minutes = delta.num_minutes().max(0);

        Self {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for TimeUntilOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
        } else if self.hours > 0 {
            write!(f, "{}h {}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}
