//!
//! Parse the masked text back into a date/time value.
//!
//! The parser is driven by the part list of
//! [parse_date_time_format](crate::date_input::date_format::parse_date_time_format).
//! Each field is cut from the masked text at its offsets, so
//! literals are never looked at.
//!
//! Fields that are not filled in at all take a default value.
//! This makes partially typed input parseable.
//!

use crate::date_input::date_format::{DatePart, DatePartInfo};
use crate::date_input::date_spin::days_in_month;
use crate::upos_type;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use unicode_segmentation::UnicodeSegmentation;

/// Result state of a parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DateState {
    /// The text gives a proper date.
    #[default]
    Valid,
    /// Some field is out of range.
    Invalid,
    /// Some field has text that can't be a number or AM/PM.
    TypeMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseResult {
    pub state: DateState,
    /// Only set for [DateState::Valid].
    pub value: Option<NaiveDateTime>,
}

impl ParseResult {
    fn fail(state: DateState) -> Self {
        Self { state, value: None }
    }
}

/// Settings for [parse].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Marks an empty slot.
    pub prompt_char: char,
    /// Two-digit years below the pivot are 20xx, the rest 19xx.
    pub century_pivot: u32,
    /// Year used if the year field is empty.
    pub reference_year: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            prompt_char: '_',
            century_pivot: 50,
            reference_year: Local::now().year(),
        }
    }
}

impl ParseOptions {
    pub fn new(prompt_char: char) -> Self {
        Self {
            prompt_char,
            ..Default::default()
        }
    }

    pub fn century_pivot(mut self, pivot: u32) -> Self {
        self.century_pivot = pivot;
        self
    }

    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Parse the masked text.
///
/// * Prompt chars and spaces are removed from each field.
///   A field left empty is unset and uses the default: day 1,
///   January, the reference year, 00:00:00. A day or month of
///   zero is treated as unset too.
/// * A numeric field with anything but ASCII digits gives
///   [DateState::TypeMismatch], as does an AM/PM field that
///   is not one of `AM`, `A`, `PM`, `P`.
/// * A year with at most two digits is moved into the century
///   given by [ParseOptions::century_pivot].
/// * A field out of its range gives [DateState::Invalid].
pub fn parse(parts: &[DatePartInfo], text: &str, options: &ParseOptions) -> ParseResult {
    let graphemes = text.graphemes(true).collect::<Vec<_>>();
    let prompt = options.prompt_char;

    let mut day = None;
    let mut month = None;
    let mut year = None;
    let mut hours = None;
    let mut minutes = None;
    let mut seconds = None;
    let mut meridiem = None;
    let mut has_meridiem = false;

    for p in parts.iter().filter(|p| p.part.is_field()) {
        let field = field_text(&graphemes, p.start, p.end, prompt);
        if p.part == DatePart::AmPm {
            has_meridiem = true;
        }
        if field.is_empty() {
            continue;
        }

        if p.part == DatePart::AmPm {
            meridiem = match field.to_ascii_uppercase().as_str() {
                "AM" | "A" => Some(Meridiem::Am),
                "PM" | "P" => Some(Meridiem::Pm),
                _ => return ParseResult::fail(DateState::TypeMismatch),
            };
            continue;
        }

        if !field.chars().all(|c| c.is_ascii_digit()) {
            return ParseResult::fail(DateState::TypeMismatch);
        }
        let Ok(v) = field.parse::<u32>() else {
            return ParseResult::fail(DateState::Invalid);
        };

        match p.part {
            DatePart::Day => day = Some(v),
            DatePart::Month => month = Some(v),
            DatePart::Year => {
                let v = v as i32;
                year = Some(if field.len() <= 2 {
                    if v < options.century_pivot as i32 {
                        2000 + v
                    } else {
                        1900 + v
                    }
                } else {
                    v
                });
            }
            DatePart::Hours => hours = Some(v),
            DatePart::Minutes => minutes = Some(v),
            DatePart::Seconds => seconds = Some(v),
            DatePart::AmPm | DatePart::Literal => {}
        }
    }

    let year = year.unwrap_or(options.reference_year);
    let month = month.filter(|v| *v != 0).unwrap_or(1);
    let day = day.filter(|v| *v != 0).unwrap_or(1);
    let mut hours = hours.unwrap_or(0);
    let minutes = minutes.unwrap_or(0);
    let seconds = seconds.unwrap_or(0);

    if month > 12
        || day > days_in_month(year, month.min(12))
        || hours > 23
        || minutes > 59
        || seconds > 59
    {
        return ParseResult::fail(DateState::Invalid);
    }

    if has_meridiem {
        hours %= 12;
        if meridiem == Some(Meridiem::Pm) {
            hours += 12;
        }
    }

    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return ParseResult::fail(DateState::Invalid);
    };
    let Some(value) = date.and_hms_opt(hours, minutes, seconds) else {
        return ParseResult::fail(DateState::Invalid);
    };

    ParseResult {
        state: DateState::Valid,
        value: Some(value),
    }
}

fn field_text(graphemes: &[&str], start: upos_type, end: upos_type, prompt: char) -> String {
    let len = graphemes.len();
    let start = (start as usize).min(len);
    let end = (end as usize).min(len);
    graphemes[start..end]
        .concat()
        .chars()
        .filter(|c| *c != prompt && !c.is_whitespace())
        .collect()
}

const ISO_DATE_TIME: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const ISO_TIME: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parse an ISO date `yyyy-MM-dd` with an optional time `THH:mm[:ss]`,
/// or a bare time `HH:mm[:ss]` which is taken on `today`.
pub fn parse_iso_date(text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let text = text.trim();
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();

    if digits == 4 {
        for fmt in ISO_DATE_TIME {
            if let Ok(v) = NaiveDateTime::parse_from_str(text, fmt) {
                return Some(v);
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    } else if digits == 2 {
        ISO_TIME
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
            .map(|t| today.and_time(t))
    } else {
        None
    }
}

/// Failed range checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RangeErrors {
    pub min_value: bool,
    pub max_value: bool,
}

impl RangeErrors {
    /// No error.
    pub fn is_empty(&self) -> bool {
        !self.min_value && !self.max_value
    }
}

// Comparison key, depending on which parts are in use.
fn range_key(
    value: &NaiveDateTime,
    include_time: bool,
    include_date: bool,
) -> (Option<NaiveDate>, Option<NaiveTime>) {
    (
        include_date.then(|| value.date()),
        include_time.then(|| value.time()),
    )
}

/// Value is before min.
///
/// Without `include_time` only the dates are compared,
/// without `include_date` only the times.
pub fn less_than_min_value(
    value: &NaiveDateTime,
    min: &NaiveDateTime,
    include_time: bool,
    include_date: bool,
) -> bool {
    range_key(value, include_time, include_date) < range_key(min, include_time, include_date)
}

/// Value is after max.
///
/// Without `include_time` only the dates are compared,
/// without `include_date` only the times.
pub fn greater_than_max_value(
    value: &NaiveDateTime,
    max: &NaiveDateTime,
    include_time: bool,
    include_date: bool,
) -> bool {
    range_key(value, include_time, include_date) > range_key(max, include_time, include_date)
}

/// Check the value against min and max. A missing value is
/// always in range.
pub fn validate_min_max(
    value: Option<&NaiveDateTime>,
    min: Option<&NaiveDateTime>,
    max: Option<&NaiveDateTime>,
    include_time: bool,
    include_date: bool,
) -> RangeErrors {
    let Some(value) = value else {
        return RangeErrors::default();
    };
    RangeErrors {
        min_value: min
            .is_some_and(|min| less_than_min_value(value, min, include_time, include_date)),
        max_value: max
            .is_some_and(|max| greater_than_max_value(value, max, include_time, include_date)),
    }
}
