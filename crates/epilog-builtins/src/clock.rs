//! Timestamps in milliseconds since the epoch, read in local time.

use chrono::{DateTime, Datelike, Local, LocalResult, TimeZone, Timelike};

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

/// Milliseconds for a local date and time; `None` if it does not exist.
pub fn make_timestamp(year: f64, month: f64, day: f64, hour: f64, minute: f64, second: f64) -> Option<i64> {
    let parts = [year, month, day, hour, minute, second];
    if parts.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let result = Local.with_ymd_and_hms(
        year as i32,
        month as u32,
        day as u32,
        hour as u32,
        minute as u32,
        second as u32,
    );
    match result {
        LocalResult::Single(time) => Some(time.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        LocalResult::None => None,
    }
}

/// A date component of a millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Year,
    Month,
    Date,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    pub fn from_name(name: &str) -> Option<DatePart> {
        Some(match name {
            "getyear" => DatePart::Year,
            "getmonth" => DatePart::Month,
            "getdate" => DatePart::Date,
            "gethour" => DatePart::Hour,
            "getminute" => DatePart::Minute,
            "getsecond" => DatePart::Second,
            _ => return None,
        })
    }

    pub fn of(self, millis: f64) -> Option<i64> {
        if !millis.is_finite() {
            return None;
        }
        let time: DateTime<Local> = match Local.timestamp_millis_opt(millis as i64) {
            LocalResult::Single(t) => t,
            LocalResult::Ambiguous(t, _) => t,
            LocalResult::None => return None,
        };
        Some(match self {
            DatePart::Year => time.year() as i64,
            DatePart::Month => time.month() as i64,
            DatePart::Date => time.day() as i64,
            DatePart::Hour => time.hour() as i64,
            DatePart::Minute => time.minute() as i64,
            DatePart::Second => time.second() as i64,
        })
    }
}
