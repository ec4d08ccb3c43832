use chrono::{NaiveDate, NaiveDateTime};
use rat_mask::date_input::{
    DateState, ParseOptions, RangeErrors, greater_than_max_value, less_than_min_value, parse,
    parse_date_time_format, parse_iso_date, validate_min_max,
};

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|v| v.and_hms_opt(h, mi, s))
        .expect("date")
}

fn opts() -> ParseOptions {
    ParseOptions::new('_').reference_year(2020)
}

fn parse_str(format: &str, text: &str) -> (DateState, Option<NaiveDateTime>) {
    let parts = parse_date_time_format(format);
    let r = parse(&parts, text, &opts());
    (r.state, r.value)
}

#[test]
fn test_parse_valid() {
    assert_eq!(
        parse_str("dd/MM/yyyy", "24/12/2020"),
        (DateState::Valid, Some(dt(2020, 12, 24, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yyyy", "29/02/2020"),
        (DateState::Valid, Some(dt(2020, 2, 29, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("MM/dd/yyyy HH:mm:ss", "12/24/2020 23:59:59"),
        (DateState::Valid, Some(dt(2020, 12, 24, 23, 59, 59)))
    );
}

#[test]
fn test_parse_defaults() {
    assert_eq!(
        parse_str("dd/MM/yyyy", "__/__/____"),
        (DateState::Valid, Some(dt(2020, 1, 1, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yyyy", "24/__/____"),
        (DateState::Valid, Some(dt(2020, 1, 24, 0, 0, 0)))
    );
    // zero day/month count as not set
    assert_eq!(
        parse_str("dd/MM/yyyy", "00/00/2021"),
        (DateState::Valid, Some(dt(2021, 1, 1, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("HH:mm", "10:3_"),
        (DateState::Valid, Some(dt(2020, 1, 1, 10, 3, 0)))
    );
}

#[test]
fn test_parse_invalid() {
    assert_eq!(parse_str("dd/MM/yyyy", "31/02/2020"), (DateState::Invalid, None));
    assert_eq!(parse_str("dd/MM/yyyy", "29/02/2021"), (DateState::Invalid, None));
    assert_eq!(parse_str("dd/MM/yyyy", "01/13/2020"), (DateState::Invalid, None));
    assert_eq!(parse_str("dd/MM/yyyy", "32/01/2020"), (DateState::Invalid, None));
    assert_eq!(parse_str("HH:mm:ss", "24:00:00"), (DateState::Invalid, None));
    assert_eq!(parse_str("HH:mm:ss", "23:60:00"), (DateState::Invalid, None));
    assert_eq!(parse_str("HH:mm:ss", "23:00:60"), (DateState::Invalid, None));
}

#[test]
fn test_parse_type_mismatch() {
    assert_eq!(
        parse_str("dd/MM/yyyy", "ab/12/2020"),
        (DateState::TypeMismatch, None)
    );
    assert_eq!(
        parse_str("dd/MM/yyyy", "1-/12/2020"),
        (DateState::TypeMismatch, None)
    );
    assert_eq!(
        parse_str("hh:mm tt", "01:30 XM"),
        (DateState::TypeMismatch, None)
    );
}

#[test]
fn test_parse_year() {
    assert_eq!(
        parse_str("dd/MM/yyyy", "24/12/5___"),
        (DateState::Valid, Some(dt(2005, 12, 24, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yyyy", "24/12/16__"),
        (DateState::Valid, Some(dt(2016, 12, 24, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yyyy", "24/12/169_"),
        (DateState::Valid, Some(dt(169, 12, 24, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yy", "24/12/60"),
        (DateState::Valid, Some(dt(1960, 12, 24, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("dd/MM/yy", "24/12/49"),
        (DateState::Valid, Some(dt(2049, 12, 24, 0, 0, 0)))
    );

    let parts = parse_date_time_format("dd/MM/yy");
    let r = parse(&parts, "24/12/60", &opts().century_pivot(70));
    assert_eq!(r.value, Some(dt(2060, 12, 24, 0, 0, 0)));
}

#[test]
fn test_parse_am_pm() {
    assert_eq!(
        parse_str("hh:mm tt", "01:30 PM"),
        (DateState::Valid, Some(dt(2020, 1, 1, 13, 30, 0)))
    );
    assert_eq!(
        parse_str("hh:mm tt", "01:30 am"),
        (DateState::Valid, Some(dt(2020, 1, 1, 1, 30, 0)))
    );
    assert_eq!(
        parse_str("hh:mm tt", "12:00 AM"),
        (DateState::Valid, Some(dt(2020, 1, 1, 0, 0, 0)))
    );
    assert_eq!(
        parse_str("hh:mm tt", "12:00 PM"),
        (DateState::Valid, Some(dt(2020, 1, 1, 12, 0, 0)))
    );
    assert_eq!(
        parse_str("hh:mm tt", "01:30 p_"),
        (DateState::Valid, Some(dt(2020, 1, 1, 13, 30, 0)))
    );
    assert_eq!(
        parse_str("hh:mm aaaaa", "07:05 P"),
        (DateState::Valid, Some(dt(2020, 1, 1, 19, 5, 0)))
    );
}

#[test]
fn test_parse_prompt() {
    let parts = parse_date_time_format("dd/MM/yyyy");
    let r = parse(&parts, "24/12/20**", &ParseOptions::new('*').reference_year(2020));
    assert_eq!(r.state, DateState::Valid);
    assert_eq!(r.value, Some(dt(2020, 12, 24, 0, 0, 0)));
}

#[test]
fn test_iso_date() {
    let today = NaiveDate::from_ymd_opt(2020, 6, 15).expect("date");

    assert_eq!(
        parse_iso_date("2020-12-24", today),
        Some(dt(2020, 12, 24, 0, 0, 0))
    );
    assert_eq!(
        parse_iso_date("2020-12-24T10:30", today),
        Some(dt(2020, 12, 24, 10, 30, 0))
    );
    assert_eq!(
        parse_iso_date("2020-12-24T10:30:15", today),
        Some(dt(2020, 12, 24, 10, 30, 15))
    );
    assert_eq!(parse_iso_date("10:30", today), Some(dt(2020, 6, 15, 10, 30, 0)));
    assert_eq!(
        parse_iso_date("10:30:05", today),
        Some(dt(2020, 6, 15, 10, 30, 5))
    );
    assert_eq!(parse_iso_date("2020-13-01", today), None);
    assert_eq!(parse_iso_date("24.12.2020", today), None);
    assert_eq!(parse_iso_date("", today), None);
}

#[test]
fn test_min_max() {
    let v = dt(2020, 6, 15, 12, 0, 0);
    let min = dt(2020, 6, 15, 13, 0, 0);

    assert!(less_than_min_value(&v, &min, true, true));
    // same date
    assert!(!less_than_min_value(&v, &min, false, true));
    // times only
    assert!(less_than_min_value(&v, &dt(2019, 1, 1, 13, 0, 0), true, false));
    assert!(!less_than_min_value(&v, &min, false, false));

    let max = dt(2020, 6, 1, 0, 0, 0);
    assert!(greater_than_max_value(&v, &max, true, true));
    assert!(greater_than_max_value(&v, &max, false, true));
    assert!(greater_than_max_value(&v, &max, true, false));
    assert!(!greater_than_max_value(&v, &dt(2020, 6, 1, 18, 0, 0), true, false));

    assert_eq!(
        validate_min_max(Some(&v), Some(&min), Some(&max), true, true),
        RangeErrors {
            min_value: true,
            max_value: true
        }
    );
    assert!(validate_min_max(None, Some(&min), Some(&max), true, true).is_empty());
    assert!(validate_min_max(Some(&v), None, None, true, true).is_empty());
}
