//!
//! Date/time format model.
//!
//! Splits a format like `dd/MM/yyyy HH:mm:ss tt` into its fields
//! and the literals between them.
//!
//! | letters | field   |
//! |---------|---------|
//! | `d` `D` | day     |
//! | `M`     | month   |
//! | `y` `Y` | year    |
//! | `h` `H` | hours, `h` is 12-hour |
//! | `m`     | minutes |
//! | `s`     | seconds |
//! | `a` `t` `T` | AM/PM |
//!
//! Everything else is a literal.
//!

use crate::text_input_mask::mask_codec;
use crate::text_input_mask::mask_op;
use crate::text_input_mask::mask_pattern::MaskPattern;
use crate::text_input_mask::mask_token::Mask;
use crate::text_input_mask::MaskOptions;
use crate::upos_type;
use chrono::{Datelike, NaiveDateTime, Timelike};
use unicode_segmentation::UnicodeSegmentation;

/// One field of a date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Day,
    Month,
    Year,
    Hours,
    Minutes,
    Seconds,
    AmPm,
    /// Separator between the fields.
    Literal,
}

impl DatePart {
    fn from_char(c: char) -> DatePart {
        match c {
            'd' | 'D' => DatePart::Day,
            'M' => DatePart::Month,
            'y' | 'Y' => DatePart::Year,
            'h' | 'H' => DatePart::Hours,
            'm' => DatePart::Minutes,
            's' => DatePart::Seconds,
            'a' | 't' | 'T' => DatePart::AmPm,
            _ => DatePart::Literal,
        }
    }

    /// Not a literal.
    #[inline]
    pub fn is_field(&self) -> bool {
        *self != DatePart::Literal
    }

    /// Day, month or year.
    #[inline]
    pub fn is_date(&self) -> bool {
        matches!(self, DatePart::Day | DatePart::Month | DatePart::Year)
    }

    /// Hours, minutes or seconds.
    #[inline]
    pub fn is_time(&self) -> bool {
        matches!(self, DatePart::Hours | DatePart::Minutes | DatePart::Seconds)
    }
}

/// Position of one field in the masked text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePartInfo {
    pub part: DatePart,
    /// Start offset in graphemes.
    pub start: upos_type,
    /// End offset in graphemes, exclusive.
    pub end: upos_type,
    /// Format letters of this field.
    pub format: String,
}

impl DatePartInfo {
    /// Width of the field.
    #[inline]
    pub fn width(&self) -> upos_type {
        self.end - self.start
    }
}

/// Is this one of the format letters.
pub fn is_date_or_time_char(c: char) -> bool {
    DatePart::from_char(c).is_field()
}

/// Splits the format into fields and literals.
///
/// The fields are widened for editing:
/// * `d`, `M`, `h`, `H`, `m` and `s` take two digits.
/// * Any year other than `yy` takes four digits.
/// * `aaaaa` is shown as `a`, any other run of `a` as `aa`.
///
/// Offsets are based on the widened fields. Malformed formats
/// are split as good as possible, this never fails.
pub fn parse_date_time_format(format: &str) -> Vec<DatePartInfo> {
    let mut runs: Vec<(DatePart, String)> = Vec::new();
    for g in format.graphemes(true) {
        let mut cs = g.chars();
        let part = match (cs.next(), cs.next()) {
            (Some(c), None) => DatePart::from_char(c),
            _ => DatePart::Literal,
        };
        match runs.last_mut() {
            Some((last, run)) if *last == part => run.push_str(g),
            _ => runs.push((part, g.to_string())),
        }
    }

    let mut parts = Vec::with_capacity(runs.len());
    let mut pos = 0;
    for (part, run) in runs {
        let format = normalize_run(part, run);
        let width = format.graphemes(true).count() as upos_type;
        parts.push(DatePartInfo {
            part,
            start: pos,
            end: pos + width,
            format,
        });
        pos += width;
    }
    parts
}

fn normalize_run(part: DatePart, run: String) -> String {
    let len = run.chars().count();
    match part {
        DatePart::Day
        | DatePart::Month
        | DatePart::Hours
        | DatePart::Minutes
        | DatePart::Seconds => {
            if len == 1 {
                run.repeat(2)
            } else {
                run
            }
        }
        DatePart::Year => {
            if len == 2 {
                run
            } else {
                "yyyy".to_string()
            }
        }
        DatePart::AmPm => {
            if run.contains('a') {
                if len == 5 {
                    "a".to_string()
                } else {
                    "aa".to_string()
                }
            } else {
                run
            }
        }
        DatePart::Literal => run,
    }
}

/// The format used for editing, with the widened fields.
pub fn normalized_format(parts: &[DatePartInfo]) -> String {
    parts.iter().map(|p| p.format.as_str()).collect()
}

/// Input mask for the format.
///
/// Numeric fields take digits, AM/PM takes letters.
pub fn edit_mask(parts: &[DatePartInfo]) -> MaskPattern {
    let mut mask = Vec::new();
    for p in parts {
        match p.part {
            DatePart::Literal => {
                for g in p.format.graphemes(true) {
                    mask.push(Mask::Literal(Box::from(g)));
                }
            }
            DatePart::AmPm => {
                for _ in 0..p.width() {
                    mask.push(Mask::Letter);
                }
            }
            _ => {
                for _ in 0..p.width() {
                    mask.push(Mask::Digit);
                }
            }
        }
    }
    MaskPattern::from_masks(mask)
}

/// Any of day, month, year.
pub fn has_date_parts(parts: &[DatePartInfo]) -> bool {
    parts.iter().any(|p| p.part.is_date())
}

/// Any of hours, minutes, seconds.
pub fn has_time_parts(parts: &[DatePartInfo]) -> bool {
    parts.iter().any(|p| p.part.is_time())
}

/// Field at the cursor position. The end of a field still
/// counts as part of the field.
pub fn target_part(parts: &[DatePartInfo], cursor: upos_type) -> Option<DatePart> {
    parts
        .iter()
        .find(|p| p.part.is_field() && p.start <= cursor && cursor <= p.end)
        .map(|p| p.part)
}

/// Field used when there is no cursor. Day or else Hours.
pub fn default_part(parts: &[DatePartInfo]) -> Option<DatePart> {
    if parts.iter().any(|p| p.part == DatePart::Day) {
        Some(DatePart::Day)
    } else if parts.iter().any(|p| p.part == DatePart::Hours) {
        Some(DatePart::Hours)
    } else {
        None
    }
}

/// Next cursor position at a literal boundary.
///
/// Moving left stops at the end of a literal or at 0, moving right
/// stops at the start of a literal or at len.
pub fn literal_boundary(
    parts: &[DatePartInfo],
    cursor: upos_type,
    forward: bool,
    len: upos_type,
) -> upos_type {
    let literals = parts
        .iter()
        .filter(|p| p.part == DatePart::Literal)
        .collect::<Vec<_>>();

    let mut pos = cursor;
    if forward {
        loop {
            pos += 1;
            if pos >= len || literals.iter().any(|l| l.start == pos) {
                break;
            }
        }
        pos.min(len)
    } else {
        loop {
            pos = pos.saturating_sub(1);
            if pos == 0 || literals.iter().any(|l| l.end == pos) {
                break;
            }
        }
        pos
    }
}

/// Text for one field of the value, zero-padded to the
/// width of the field.
pub fn part_value(value: &NaiveDateTime, info: &DatePartInfo) -> String {
    let width = info.width() as usize;
    let v = match info.part {
        DatePart::Day => value.day() as i64,
        DatePart::Month => value.month() as i64,
        DatePart::Year => {
            if width == 2 {
                value.year().rem_euclid(100) as i64
            } else {
                value.year() as i64
            }
        }
        DatePart::Hours => {
            if info.format.contains('h') {
                value.hour12().1 as i64
            } else {
                value.hour() as i64
            }
        }
        DatePart::Minutes => value.minute() as i64,
        DatePart::Seconds => value.second() as i64,
        DatePart::AmPm => {
            let pm = value.hour12().0;
            return match (width, pm) {
                (1, false) => "A".to_string(),
                (1, true) => "P".to_string(),
                (_, false) => "AM".to_string(),
                (_, true) => "PM".to_string(),
            };
        }
        DatePart::Literal => return info.format.clone(),
    };

    let s = format!("{:0width$}", v, width = width);
    // keep the last digits if the value is too wide
    let skip = s.len().saturating_sub(width);
    s[skip..].to_string()
}

/// Renders the value into the edit mask.
pub fn render_value(
    value: &NaiveDateTime,
    parts: &[DatePartInfo],
    options: &MaskOptions,
) -> String {
    let mut text = mask_codec::empty_mask(options);
    for p in parts.iter().filter(|p| p.part.is_field()) {
        let v = part_value(value, p);
        text = mask_op::replace(&text, &v, options, p.start, p.end).value;
    }
    text
}
