//! Duration arithmetic shared by the overwork calculator and reporting.
//!
//! Durations are `chrono::TimeDelta` values; reporting converts them to
//! decimal hours for money and to `HH:MM` strings for display.

use chrono::{DateTime, FixedOffset, TimeDelta};
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: i64 = 3600;

/// Returns `end - start`.
///
/// No validation happens here; an `end` before `start` yields a negative
/// duration.
pub fn session_duration(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> TimeDelta {
    end - start
}

/// Sums a sequence of durations, returning zero for an empty sequence.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::total_duration;
/// use chrono::TimeDelta;
///
/// let total = total_duration([TimeDelta::hours(5), TimeDelta::minutes(90)]);
/// assert_eq!(total, TimeDelta::minutes(390));
/// assert_eq!(total_duration(std::iter::empty()), TimeDelta::zero());
/// ```
pub fn total_duration<I>(durations: I) -> TimeDelta
where
    I: IntoIterator<Item = TimeDelta>,
{
    durations
        .into_iter()
        .fold(TimeDelta::zero(), |acc, d| acc + d)
}

/// Converts a duration to decimal hours using whole seconds.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::hours_decimal;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(hours_decimal(TimeDelta::minutes(90)), Decimal::from_str("1.5").unwrap());
/// ```
pub fn hours_decimal(duration: TimeDelta) -> Decimal {
    Decimal::new(duration.num_seconds(), 0) / Decimal::new(SECONDS_PER_HOUR, 0)
}

/// Renders a duration as `HH:MM`.
///
/// Hours are not wrapped at 24 and seconds are truncated. Negative
/// durations get a leading `-`.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::format_hours_minutes;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_hours_minutes(TimeDelta::hours(9)), "09:00");
/// assert_eq!(format_hours_minutes(TimeDelta::minutes(6005)), "100:05");
/// assert_eq!(format_hours_minutes(TimeDelta::minutes(-90)), "-01:30");
/// ```
pub fn format_hours_minutes(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let abs_minutes = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, abs_minutes / 60, abs_minutes % 60)
}
