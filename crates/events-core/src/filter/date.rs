//! Date bound parsing.
//!
//! A bound is either a calendar day (`YYYY-MM-DD`), read in a time zone and
//! widened to cover the whole day, or an exact RFC 3339 instant.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use sp_events_api::models::parse_timestamp;

use super::error::{FilterError, FilterResult};

/// Time zone in which calendar-day bounds are read by default.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Parses an IANA time zone name.
pub fn parse_time_zone(name: &str) -> FilterResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| FilterError::unknown_time_zone(name))
}

/// Parses a lower bound: a day starts at its first local instant in `tz`.
pub fn parse_date_from(input: &str, tz: Tz) -> FilterResult<DateTime<Utc>> {
    let input = input.trim();
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(day) => start_of_day(day, tz).ok_or_else(|| FilterError::invalid_date(input)),
        Err(_) => parse_timestamp(input).ok_or_else(|| FilterError::invalid_date(input)),
    }
}

/// Parses an upper bound: a day ends just before the next day starts.
///
/// A bare day is a local calendar day in `tz`, not UTC midnight, and `to`
/// covers all of it, so an event at 21:00 on the last day is kept. Pass an
/// RFC 3339 instant such as `2025-05-31T00:00:00Z` to bound at an exact
/// moment instead.
pub fn parse_date_to(input: &str, tz: Tz) -> FilterResult<DateTime<Utc>> {
    let input = input.trim();
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(day) => day
            .succ_opt()
            .and_then(|next| start_of_day(next, tz))
            .map(|next_start| next_start - Duration::nanoseconds(1))
            .ok_or_else(|| FilterError::invalid_date(input)),
        Err(_) => parse_timestamp(input).ok_or_else(|| FilterError::invalid_date(input)),
    }
}

/// First instant of `day` in `tz`.
///
/// Zones that start daylight saving at midnight skip 00:00, so the first
/// existing local hour is used.
fn start_of_day(day: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    (0..3).find_map(|hour| {
        let local = day.and_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}
