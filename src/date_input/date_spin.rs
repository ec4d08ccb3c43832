//!
//! Step one field of a date/time up or down.
//!
//! With `is_loop` the field wraps around. Day and month wrap
//! along the calendar and carry into the next month/year,
//! the time fields wrap within their own range.
//!
//! Without `is_loop` the field is clamped to its range and nothing
//! carries over.
//!
//! A day that doesn't exist in the target month is clamped to
//! the last day of that month.
//!

use crate::date_input::DatePart;
use crate::MaskError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Timelike};

/// Number of days in the month. Month is 1-based.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(a), Some(b)) => b.signed_duration_since(a).num_days() as u32,
        _ => 31,
    }
}

/// Spin the given part.
///
/// Without a value there is nothing to spin and None is returned.
/// A literal leaves the value as it is.
pub fn spin(
    part: DatePart,
    delta: i32,
    value: Option<NaiveDateTime>,
    is_loop: bool,
) -> Option<NaiveDateTime> {
    let value = value?;
    Some(match part {
        DatePart::Day => spin_date(delta, value, is_loop),
        DatePart::Month => spin_month(delta, value, is_loop),
        DatePart::Year => spin_year(delta, value, is_loop),
        DatePart::Hours => spin_hours(delta, value, is_loop),
        DatePart::Minutes => spin_minutes(delta, value, is_loop),
        DatePart::Seconds => spin_seconds(delta, value, is_loop),
        DatePart::AmPm => spin_am_pm(delta, value, is_loop),
        DatePart::Literal => value,
    })
}

/// Spin the given part. Fails for [DatePart::Literal].
pub fn try_spin(
    part: DatePart,
    delta: i32,
    value: Option<NaiveDateTime>,
    is_loop: bool,
) -> Result<Option<NaiveDateTime>, MaskError> {
    if !part.is_field() {
        return Err(MaskError::NotAField(part));
    }
    Ok(spin(part, delta, value, is_loop))
}

pub fn spin_date(delta: i32, value: NaiveDateTime, is_loop: bool) -> NaiveDateTime {
    if is_loop {
        let n = Days::new(delta.unsigned_abs() as u64);
        let v = if delta >= 0 {
            value.checked_add_days(n)
        } else {
            value.checked_sub_days(n)
        };
        v.unwrap_or(value)
    } else {
        let max = days_in_month(value.year(), value.month()) as i64;
        let day = (value.day() as i64 + delta as i64).clamp(1, max);
        value.with_day(day as u32).unwrap_or(value)
    }
}

pub fn spin_month(delta: i32, value: NaiveDateTime, is_loop: bool) -> NaiveDateTime {
    if is_loop {
        // Months clamps the day to the end of the month.
        let n = Months::new(delta.unsigned_abs());
        let v = if delta >= 0 {
            value.checked_add_months(n)
        } else {
            value.checked_sub_months(n)
        };
        v.unwrap_or(value)
    } else {
        let month = (value.month() as i64 + delta as i64).clamp(1, 12) as u32;
        with_ymd(value, value.year(), month)
    }
}

pub fn spin_year(delta: i32, value: NaiveDateTime, _is_loop: bool) -> NaiveDateTime {
    match value.year().checked_add(delta) {
        Some(year) => with_ymd(value, year, value.month()),
        None => value,
    }
}

pub fn spin_hours(delta: i32, value: NaiveDateTime, is_loop: bool) -> NaiveDateTime {
    let hour = spin_range(value.hour(), delta, 24, is_loop);
    value.with_hour(hour).unwrap_or(value)
}

pub fn spin_minutes(delta: i32, value: NaiveDateTime, is_loop: bool) -> NaiveDateTime {
    let minute = spin_range(value.minute(), delta, 60, is_loop);
    value.with_minute(minute).unwrap_or(value)
}

pub fn spin_seconds(delta: i32, value: NaiveDateTime, is_loop: bool) -> NaiveDateTime {
    let second = spin_range(value.second(), delta, 60, is_loop);
    value.with_second(second).unwrap_or(value)
}

/// Switches between AM and PM. The delta is ignored, there
/// are only two values.
pub fn spin_am_pm(_delta: i32, value: NaiveDateTime, _is_loop: bool) -> NaiveDateTime {
    let hour = value.hour();
    let hour = if hour < 12 { hour + 12 } else { hour - 12 };
    value.with_hour(hour).unwrap_or(value)
}

fn spin_range(v: u32, delta: i32, size: u32, is_loop: bool) -> u32 {
    let v = v as i64 + delta as i64;
    if is_loop {
        v.rem_euclid(size as i64) as u32
    } else {
        v.clamp(0, size as i64 - 1) as u32
    }
}

// Same day and time in another month, clamped to the month.
fn with_ymd(value: NaiveDateTime, year: i32, month: u32) -> NaiveDateTime {
    let day = value.day().min(days_in_month(year, month));
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d.and_time(value.time()),
        None => value,
    }
}
