use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::error::{TimelineError, TimelineResult};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const QUARTER_SPANS: [&str; 4] = ["Jan-Mar", "Apr-Jun", "Jul-Sep", "Oct-Dec"];

/// Zero-based quarter index (`0..=3`) of `date`.
#[must_use]
pub fn quarter_index(date: NaiveDate) -> u32 {
    date.month0() / 3
}

/// Zero-based month offset (`0..=2`) of `date` inside its quarter.
#[must_use]
pub fn month_in_quarter(date: NaiveDate) -> u32 {
    date.month0() % 3
}

#[must_use]
pub fn month_abbreviation(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

#[must_use]
pub fn quarter_span_label(quarter_index: u32) -> &'static str {
    QUARTER_SPANS[(quarter_index % 4) as usize]
}

pub fn first_day_of_month(date: NaiveDate) -> TimelineResult<NaiveDate> {
    date.with_day(1)
        .ok_or_else(|| TimelineError::overflow(format!("resolving first day of month for {date}")))
}

pub fn first_day_of_quarter(date: NaiveDate) -> TimelineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), quarter_index(date) * 3 + 1, 1)
        .ok_or_else(|| TimelineError::overflow(format!("resolving quarter start for {date}")))
}

pub fn first_day_of_year(year: i32) -> TimelineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| TimelineError::overflow(format!("resolving January 1st of {year}")))
}

pub fn monday_on_or_before(date: NaiveDate) -> TimelineResult<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back))
        .ok_or_else(|| TimelineError::overflow(format!("resolving Monday before {date}")))
}

pub fn add_months(date: NaiveDate, months: u32) -> TimelineResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| TimelineError::overflow(format!("adding {months} months to {date}")))
}

pub fn add_days(date: NaiveDate, days: u64) -> TimelineResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| TimelineError::overflow(format!("adding {days} days to {date}")))
}

pub fn previous_day(date: NaiveDate) -> TimelineResult<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| TimelineError::overflow(format!("stepping back from {date}")))
}

/// Shifts an instant by a signed number of whole days.
pub fn shift_by_days(instant: DateTime<Utc>, days: i64) -> TimelineResult<DateTime<Utc>> {
    TimeDelta::try_days(days)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or_else(|| TimelineError::overflow(format!("shifting {instant} by {days} days")))
}

/// Parses an ISO-8601 instant.
///
/// Accepts RFC 3339 timestamps, zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as
/// UTC) and plain `YYYY-MM-DD` dates (UTC midnight).
#[must_use]
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
