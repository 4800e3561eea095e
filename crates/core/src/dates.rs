#![forbid(unsafe_code)]

use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

pub const DEFAULT_MAX_TARGET_DAYS: u32 = 365;

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_target_date(value: &str) -> Result<Date, DateError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|_| DateError::Malformed {
        value: value.to_string(),
    })
}

/// A target date may be today but not earlier, and at most `max_days`
/// ahead of `today`.
pub fn check_target_window(target: Date, today: Date, max_days: u32) -> Result<(), DateError> {
    if target < today {
        return Err(DateError::InPast);
    }
    if let Some(limit) = days_after(today, max_days)
        && target > limit
    {
        return Err(DateError::TooFar { max_days });
    }
    Ok(())
}

/// `today` plus `days`, or `None` when that lies past the last
/// representable date. Callers treat `None` as "no upper bound".
pub fn days_after(today: Date, days: u32) -> Option<Date> {
    today.checked_add(Duration::days(i64::from(days)))
}

/// Whether `target` falls on or before `today + days`. Overdue dates count.
pub fn is_due_within(target: Date, today: Date, days: u32) -> bool {
    days_after(today, days).is_none_or(|cutoff| target <= cutoff)
}

/// Parses and window-checks a target date, returning its canonical text.
pub fn validate_target_date(value: &str, today: Date, max_days: u32) -> Result<String, DateError> {
    let date = parse_target_date(value)?;
    check_target_window(date, today, max_days)?;
    Ok(format_date(date))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("target date {value:?} is not a YYYY-MM-DD date")]
    Malformed { value: String },
    #[error("target date must not be in the past")]
    InPast,
    #[error("target date cannot be more than {max_days} days in the future")]
    TooFar { max_days: u32 },
}
