use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TradingCalendar {
    /// IANA name of the exchange zone, used for display only
    pub timezone: String,

    /// Short zone label used in status descriptions, e.g. "IST"
    pub zone_label: String,

    /// Fixed offset from UTC in minutes, no DST rules applied
    pub utc_offset_minutes: i32,

    /// Session open in exchange local time (inclusive)
    pub open_hour: u8,
    pub open_minute: u8,

    /// Session close in exchange local time (inclusive)
    pub close_hour: u8,
    pub close_minute: u8,
}

impl Default for TradingCalendar {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            zone_label: "IST".to_string(),
            utc_offset_minutes: 330, // UTC+05:30
            open_hour: 9,
            open_minute: 15,
            close_hour: 15,
            close_minute: 30,
        }
    }
}

impl TradingCalendar {
    pub fn open_seconds(&self) -> u32 {
        seconds_of_day(self.open_hour, self.open_minute)
    }

    pub fn close_seconds(&self) -> u32 {
        seconds_of_day(self.close_hour, self.close_minute)
    }

    /// `None` when the configured minutes do not fit in seconds.
    pub fn utc_offset_seconds(&self) -> Option<i32> {
        self.utc_offset_minutes.checked_mul(60)
    }

    pub fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            bail!("utc_offset_minutes must be within (-1440, 1440)");
        }
        if self.open_hour > 23 || self.close_hour > 23 {
            bail!("open_hour and close_hour must be 0-23");
        }
        if self.open_minute > 59 || self.close_minute > 59 {
            bail!("open_minute and close_minute must be 0-59");
        }
        if self.open_seconds() >= self.close_seconds() {
            bail!("session must open before it closes on the same day");
        }
        Ok(())
    }

    /// "9:15 AM" style rendering of a local time-of-day.
    pub fn format_clock(hour: u8, minute: u8) -> String {
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour_12 = match hour % 12 {
            0 => 12,
            other => other,
        };
        format!("{hour_12}:{minute:02} {meridiem}")
    }
}

fn seconds_of_day(hour: u8, minute: u8) -> u32 {
    hour as u32 * 3600 + minute as u32 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calendar_is_valid_nse_session() {
        let calendar = TradingCalendar::default();

        assert!(calendar.validate().is_ok());
        assert_eq!(calendar.open_seconds(), 9 * 3600 + 15 * 60);
        assert_eq!(calendar.close_seconds(), 15 * 3600 + 30 * 60);
        assert_eq!(calendar.utc_offset_seconds(), Some(19_800));
    }

    #[test]
    fn rejects_overnight_session() {
        let calendar = TradingCalendar {
            open_hour: 22,
            close_hour: 4,
            ..TradingCalendar::default()
        };

        assert!(calendar.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad_minute = TradingCalendar {
            open_minute: 60,
            ..TradingCalendar::default()
        };
        let bad_offset = TradingCalendar {
            utc_offset_minutes: 1440,
            ..TradingCalendar::default()
        };

        assert!(bad_minute.validate().is_err());
        assert!(bad_offset.validate().is_err());
    }

    #[test]
    fn extreme_offsets_are_rejected_without_overflow() {
        for utc_offset_minutes in [i32::MIN, i32::MAX, -1440] {
            let calendar = TradingCalendar {
                utc_offset_minutes,
                ..TradingCalendar::default()
            };

            assert!(calendar.validate().is_err());
        }

        let calendar = TradingCalendar {
            utc_offset_minutes: i32::MIN,
            ..TradingCalendar::default()
        };
        assert_eq!(calendar.utc_offset_seconds(), None);
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(TradingCalendar::format_clock(9, 15), "9:15 AM");
        assert_eq!(TradingCalendar::format_clock(15, 30), "3:30 PM");
        assert_eq!(TradingCalendar::format_clock(0, 5), "12:05 AM");
        assert_eq!(TradingCalendar::format_clock(12, 0), "12:00 PM");
    }
}
