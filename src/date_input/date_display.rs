//!
//! Display formatting for the unfocused date input.
//!
//! The display format uses the same letters as the input format,
//! with some additions:
//!
//! * `MMM` and `MMMM` give the short and long month name.
//! * `E` to `EEE` give the short weekday name, `EEEE` the long one.
//! * Text between single quotes is copied as is. `''` is a quote.
//!
//! There are also some predefined names that use the
//! patterns of the locale:
//! `short`, `medium`, `long`, `full`, `shortDate`, `mediumDate`,
//! `longDate`, `fullDate`, `shortTime`, `mediumTime`, `longTime`
//! and `fullTime`.
//!

use crate::date_input::date_format::{normalized_format, parse_date_time_format};
use crate::MaskError;
use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::{NaiveDateTime, TimeZone, Utc};
use pure_rust_locales::{Locale, locale_match};
use std::fmt::{Debug, Write};

/// Formats the value for display.
pub trait DateFormatter: Debug {
    fn format_date(&self, value: &NaiveDateTime, format: &str, locale: Locale) -> String;
}

/// Formatter using chrono.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChronoFormatter;

impl DateFormatter for ChronoFormatter {
    fn format_date(&self, value: &NaiveDateTime, format: &str, locale: Locale) -> String {
        let pattern = strftime_pattern(format, locale);
        let dt = Utc.from_utc_datetime(value);

        let mut buf = String::new();
        match write!(buf, "{}", dt.format_localized(&pattern, locale)) {
            Ok(_) => buf,
            Err(_) => {
                log::warn!("unusable display format {:?}", format);
                value.to_string()
            }
        }
    }
}

/// Locale pattern for one of the predefined names.
pub fn predefined_format(name: &str, locale: Locale) -> Option<String> {
    let d_fmt = locale_match!(locale => LC_TIME::D_FMT);
    let t_fmt = locale_match!(locale => LC_TIME::T_FMT);
    let d_t_fmt = locale_match!(locale => LC_TIME::D_T_FMT);

    let medium_date = "%e %b %Y";
    let long_date = "%e %B %Y";
    let full_date = "%A, %e %B %Y";

    let f = match name {
        "short" => format!("{} %H:%M", d_fmt),
        "medium" => d_t_fmt.to_string(),
        "long" => format!("{} {}", long_date, t_fmt),
        "full" => format!("{} {}", full_date, t_fmt),
        "shortDate" => d_fmt.to_string(),
        "mediumDate" => medium_date.to_string(),
        "longDate" => long_date.to_string(),
        "fullDate" => full_date.to_string(),
        "shortTime" => "%H:%M".to_string(),
        "mediumTime" | "longTime" | "fullTime" => t_fmt.to_string(),
        _ => return None,
    };
    Some(f)
}

/// Translates the display format to a chrono strftime pattern.
pub fn strftime_pattern(format: &str, locale: Locale) -> String {
    if let Some(f) = predefined_format(format, locale) {
        return f;
    }

    let mut buf = String::new();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                buf.push('\'');
                continue;
            }
            while let Some(c) = chars.next() {
                if c != '\'' {
                    push_literal(&mut buf, c);
                } else if chars.peek() == Some(&'\'') {
                    chars.next();
                    buf.push('\'');
                } else {
                    break;
                }
            }
            continue;
        }

        let mut n = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            n += 1;
        }
        match (c, n) {
            ('d' | 'D', 1) => buf.push_str("%-d"),
            ('d' | 'D', _) => buf.push_str("%d"),
            ('M', 1) => buf.push_str("%-m"),
            ('M', 2) => buf.push_str("%m"),
            ('M', 3) => buf.push_str("%b"),
            ('M', _) => buf.push_str("%B"),
            ('y' | 'Y', 2) => buf.push_str("%y"),
            ('y' | 'Y', _) => buf.push_str("%Y"),
            ('H', 1) => buf.push_str("%-H"),
            ('H', _) => buf.push_str("%H"),
            ('h', 1) => buf.push_str("%-I"),
            ('h', _) => buf.push_str("%I"),
            ('m', 1) => buf.push_str("%-M"),
            ('m', _) => buf.push_str("%M"),
            ('s', 1) => buf.push_str("%-S"),
            ('s', _) => buf.push_str("%S"),
            ('E', 1..=3) => buf.push_str("%a"),
            ('E', _) => buf.push_str("%A"),
            ('a' | 't' | 'T', _) => buf.push_str("%p"),
            (c, n) => {
                for _ in 0..n {
                    push_literal(&mut buf, c);
                }
            }
        }
    }
    buf
}

fn push_literal(buf: &mut String, c: char) {
    if c == '%' {
        buf.push_str("%%");
    } else {
        buf.push(c);
    }
}

/// Converts a chrono strftime pattern to an input format.
///
/// Only the numeric day, month, year and time fields and AM/PM
/// can be used for input.
pub fn input_format_from_strftime(pattern: &str, locale: Locale) -> Result<String, MaskError> {
    let err = || MaskError::InvalidFormat(pattern.to_string());

    let items = StrftimeItems::new_with_locale(pattern, locale)
        .parse()
        .map_err(|_| err())?;

    let mut format = String::new();
    for t in &items {
        match t {
            Item::Literal(s) | Item::Space(s) => format.push_str(s),
            Item::OwnedLiteral(s) | Item::OwnedSpace(s) => format.push_str(s),
            Item::Numeric(v, _) => match v {
                Numeric::Year | Numeric::IsoYear => format.push_str("yyyy"),
                Numeric::YearMod100 | Numeric::IsoYearMod100 => format.push_str("yy"),
                Numeric::Month => format.push_str("MM"),
                Numeric::Day => format.push_str("dd"),
                Numeric::Hour => format.push_str("HH"),
                Numeric::Hour12 => format.push_str("hh"),
                Numeric::Minute => format.push_str("mm"),
                Numeric::Second => format.push_str("ss"),
                _ => return Err(err()),
            },
            Item::Fixed(Fixed::LowerAmPm | Fixed::UpperAmPm) => format.push_str("tt"),
            _ => return Err(err()),
        }
    }
    Ok(format)
}

/// Input format from the date pattern of the locale.
///
/// Falls back to `MM/dd/yyyy` if the locale pattern can't be used.
pub fn default_input_format(locale: Locale) -> String {
    let d_fmt = locale_match!(locale => LC_TIME::D_FMT);
    match input_format_from_strftime(d_fmt, locale) {
        Ok(f) => normalized_format(&parse_date_time_format(&f)),
        Err(_) => {
            log::debug!("no input format for {:?}, using default", locale);
            "MM/dd/yyyy".to_string()
        }
    }
}
