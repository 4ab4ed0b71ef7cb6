use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, AppResult};

pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses a stored climb date into wall-clock time in `tz`.
///
/// Offset-carrying timestamps (`2024-03-15T07:00:00.000Z`) are shifted into
/// the zone; naive timestamps and bare dates are taken as already local.
pub fn parse_local_datetime(raw: &str, tz: Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz).naive_local());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

pub fn parse_record_datetime(value: &Option<String>, tz: Tz) -> Option<NaiveDateTime> {
    value
        .as_deref()
        .and_then(|raw| parse_local_datetime(raw, tz))
}

pub fn parse_timezone(value: &str) -> AppResult<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|err| AppError::validation(format!("unknown timezone '{value}': {err}")))
}

pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

pub fn day_label(index: u32) -> &'static str {
    DAY_LABELS[(index % 7) as usize]
}

pub fn month_label(month0: u32) -> &'static str {
    MONTH_LABELS[(month0 % 12) as usize]
}
