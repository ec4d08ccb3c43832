use chrono::{NaiveDate, NaiveDateTime};
use rat_mask::MaskError;
use rat_mask::date_input::{DatePart, DateState, DateTimeConfig, DateTimeEvent, DateTimeInputState};
use rat_mask::event::TextOutcome;
use rat_mask::text_input_mask::{EditKey, InputEvent};

fn setup_logging() {
    _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply();
}

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|v| v.and_hms_opt(h, mi, s))
        .expect("date")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    dt(y, m, d, 0, 0, 0)
}

fn now() -> NaiveDateTime {
    dt(2020, 6, 15, 10, 30, 0)
}

fn state(config: DateTimeConfig) -> DateTimeInputState {
    setup_logging();
    DateTimeInputState::from_config(config)
        .expect("config")
        .with_clock(now)
}

fn ddmmyyyy() -> DateTimeInputState {
    state(DateTimeConfig::default().input_format("dd/MM/yyyy"))
}

#[test]
fn test_typing() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    assert_eq!(s.text(), "__/__/____");
    s.focus();
    assert_eq!(s.text(), "__/__/____");

    let r = s.replace_text(0..0, "24")?;
    assert_eq!(r.outcome, TextOutcome::TextChanged);
    assert!(r.events.is_empty());
    assert_eq!(s.text(), "24/__/____");
    assert_eq!(s.cursor(), 2);
    assert_eq!(s.value(), Some(date(2020, 1, 24)));

    let r = s.replace_text(2..2, "122020")?;
    assert_eq!(s.text(), "24/12/2020");
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: None,
            new: Some(date(2020, 12, 24)),
        }]
    );
    assert_eq!(s.value(), Some(date(2020, 12, 24)));
    assert_eq!(s.state(), DateState::Valid);
    assert!(s.is_valid());
    Ok(())
}

#[test]
fn test_typing_invalid() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.focus();

    let r = s.replace_text(0..0, "31022020")?;
    assert_eq!(s.text(), "31/02/2020");
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValidationFailed {
            old: None,
            new: None,
            user_input: "31/02/2020".into(),
        }]
    );
    assert_eq!(s.value(), None);
    assert_eq!(s.state(), DateState::Invalid);
    assert!(!s.is_valid());

    // keystrokes that don't fit are dropped
    let r = s.replace_text(0..1, "x")?;
    assert_eq!(r.outcome, TextOutcome::Changed);
    assert_eq!(s.text(), "31/02/2020");
    Ok(())
}

#[test]
fn test_typing_clear() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.focus();
    s.replace_text(0..0, "24122020")?;

    let r = s.replace_text(0..10, "")?;
    assert_eq!(s.text(), "__/__/____");
    assert_eq!(s.value(), None);
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: Some(date(2020, 12, 24)),
            new: None,
        }]
    );
    Ok(())
}

#[test]
fn test_min_max() -> Result<(), anyhow::Error> {
    let mut s = state(
        DateTimeConfig::default()
            .input_format("dd/MM/yyyy")
            .min_value("2020-06-01")
            .max_value("30/06/2020"),
    );
    assert_eq!(s.min_value(), Some(date(2020, 6, 1)));
    assert_eq!(s.max_value(), Some(date(2020, 6, 30)));

    s.focus();
    let r = s.replace_text(0..0, "15072020")?;
    assert_eq!(
        r.events,
        vec![
            DateTimeEvent::ValidationFailed {
                old: None,
                new: Some(date(2020, 7, 15)),
                user_input: "15/07/2020".into(),
            },
            DateTimeEvent::ValueChanged {
                old: None,
                new: Some(date(2020, 7, 15)),
            }
        ]
    );
    // the value is kept nevertheless
    assert_eq!(s.value(), Some(date(2020, 7, 15)));
    assert!(s.range_errors().max_value);
    assert!(!s.is_valid());

    // blur reports again
    let r = s.blur();
    assert!(r.validation_failed());
    assert!(!r.value_changed());

    let mut s = state(
        DateTimeConfig::default()
            .input_format("dd/MM/yyyy")
            .min_value(NaiveDate::from_ymd_opt(2020, 6, 1).expect("date"))
            .max_value("not a date"),
    );
    assert_eq!(s.min_value(), Some(date(2020, 6, 1)));
    assert_eq!(s.max_value(), None);
    s.focus();
    let r = s.replace_text(0..0, "15062020")?;
    assert!(!r.validation_failed());
    assert!(s.is_valid());
    Ok(())
}

#[test]
fn test_blur() -> Result<(), anyhow::Error> {
    let mut s = state(
        DateTimeConfig::default()
            .input_format("dd/MM/yyyy")
            .display_format("dd MMM yyyy"),
    );
    s.focus();
    s.replace_text(0..0, "24122020")?;
    let r = s.blur();
    assert_eq!(r.outcome, TextOutcome::Changed);
    assert!(r.events.is_empty());
    assert_eq!(s.text(), "24 Dec 2020");

    s.focus();
    assert_eq!(s.text(), "24/12/2020");
    Ok(())
}

#[test]
fn test_blur_incomplete() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.focus();
    s.replace_text(0..0, "24")?;

    let r = s.blur();
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: None,
            new: Some(date(2020, 1, 24)),
        }]
    );
    assert_eq!(s.text(), "24/01/2020");
    Ok(())
}

#[test]
fn test_blur_empty_and_invalid() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.focus();
    let r = s.blur();
    assert!(r.events.is_empty());
    assert_eq!(s.text(), "__/__/____");

    s.focus();
    s.replace_text(0..0, "31022020")?;
    let r = s.blur();
    assert!(r.events.is_empty());
    assert_eq!(s.value(), None);
    assert_eq!(s.text(), "__/__/____");

    s.focus();
    s.replace_text(0..0, "99")?;
    let r = s.blur();
    assert!(r.validation_failed());
    assert_eq!(s.state(), DateState::Invalid);
    assert_eq!(s.text(), "__/__/____");
    Ok(())
}

#[test]
fn test_spin_without_value() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();

    let r = s.increment(None)?;
    assert_eq!(r.outcome, TextOutcome::TextChanged);
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: None,
            new: Some(now()),
        }]
    );
    assert_eq!(s.text(), "15/06/2020");

    // not focused, uses the day
    s.increment(None)?;
    assert_eq!(s.value(), Some(dt(2020, 6, 16, 10, 30, 0)));
    s.decrement(Some(DatePart::Year))?;
    assert_eq!(s.value(), Some(dt(2019, 6, 16, 10, 30, 0)));
    Ok(())
}

#[test]
fn test_spin_at_cursor() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.set_value(Some(date(2020, 12, 29)));
    s.focus();
    s.set_cursor(4);
    assert_eq!(s.target_part(), Some(DatePart::Month));

    let r = s.increment(None)?;
    assert_eq!(s.text(), "29/01/2021");
    assert_eq!(s.cursor(), 4);
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: Some(date(2020, 12, 29)),
            new: Some(date(2021, 1, 29)),
        }]
    );

    s.is_spin_loop = false;
    s.set_value(Some(date(2020, 12, 31)));
    let r = s.increment(None)?;
    assert_eq!(r.outcome, TextOutcome::Unchanged);
    assert!(r.events.is_empty());
    assert_eq!(s.value(), Some(date(2020, 12, 31)));

    assert_eq!(
        s.spin(DatePart::Literal, 1),
        Err(MaskError::NotAField(DatePart::Literal))
    );
    Ok(())
}

#[test]
fn test_time_only() -> Result<(), anyhow::Error> {
    let mut s = state(DateTimeConfig::default().input_format("hh:mm tt"));
    assert_eq!(s.text(), "__:__ __");

    s.focus();
    let r = s.replace_text(0..0, "0130PM")?;
    assert_eq!(s.text(), "01:30 PM");
    assert_eq!(s.value(), Some(dt(2020, 1, 1, 13, 30, 0)));
    assert!(r.value_changed());

    s.set_cursor(7);
    s.increment(None)?;
    assert_eq!(s.text(), "01:30 AM");
    assert_eq!(s.value(), Some(dt(2020, 1, 1, 1, 30, 0)));

    s.blur();
    s.increment(None)?;
    assert_eq!(s.value(), Some(dt(2020, 1, 1, 2, 30, 0)));
    assert_eq!(s.text(), "02:30 AM");
    Ok(())
}

#[test]
fn test_set_value() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.set_value(Some(date(2020, 12, 24)));
    assert_eq!(s.text(), "24/12/2020");
    assert_eq!(s.old_value(), None);

    s.focus();
    let r = s.replace_text(0..10, "01012021")?;
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: Some(date(2020, 12, 24)),
            new: Some(date(2021, 1, 1)),
        }]
    );
    assert_eq!(s.old_value(), Some(date(2020, 12, 24)));

    let r = s.clear();
    assert_eq!(s.value(), None);
    assert_eq!(s.text(), "__/__/____");
    assert_eq!(
        r.events,
        vec![DateTimeEvent::ValueChanged {
            old: Some(date(2021, 1, 1)),
            new: None,
        }]
    );

    let r = s.set_now();
    assert_eq!(s.value(), Some(now()));
    assert!(r.value_changed());
    Ok(())
}

#[test]
fn test_set_value_none_focused() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();
    s.set_value(Some(date(2020, 12, 24)));
    s.focus();
    assert_eq!(s.text(), "24/12/2020");

    s.set_value(None);
    assert_eq!(s.value(), None);
    assert_eq!(s.text(), "__/__/____");
    assert!(!s.widget.is_complete());

    // typing starts from an empty buffer.
    let r = s.replace_text(0..0, "1")?;
    assert!(r.events.is_empty());
    assert_eq!(s.text(), "1_/__/____");
    Ok(())
}

#[test]
fn test_literal_navigation() {
    let mut s = ddmmyyyy();
    s.focus();
    s.set_cursor(0);

    assert!(s.move_to_next_literal());
    assert_eq!(s.cursor(), 2);
    s.move_to_next_literal();
    assert_eq!(s.cursor(), 5);
    s.move_to_next_literal();
    assert_eq!(s.cursor(), 10);
    assert!(!s.move_to_next_literal());

    s.move_to_prev_literal();
    assert_eq!(s.cursor(), 6);
    s.move_to_prev_literal();
    assert_eq!(s.cursor(), 3);
    s.move_to_prev_literal();
    assert_eq!(s.cursor(), 0);
}

#[test]
fn test_handle() -> Result<(), anyhow::Error> {
    let mut s = ddmmyyyy();

    let input = InputEvent::Input {
        range: 0..0,
        text: "24".into(),
    };
    assert_eq!(s.handle(&input)?.outcome, TextOutcome::Continue);
    assert_eq!(
        s.handle(&InputEvent::Key(EditKey::Up))?.outcome,
        TextOutcome::Continue
    );
    assert_eq!(s.value(), None);

    assert_eq!(s.handle(&InputEvent::Focus)?.outcome, TextOutcome::Changed);
    assert_eq!(s.handle(&input)?.outcome, TextOutcome::TextChanged);
    assert_eq!(s.text(), "24/__/____");

    let r = s.handle(&InputEvent::Key(EditKey::Now))?;
    assert!(r.value_changed());
    assert_eq!(s.text(), "15/06/2020");

    s.set_cursor(0);
    s.handle(&InputEvent::Key(EditKey::Down))?;
    assert_eq!(s.value(), Some(dt(2020, 6, 14, 10, 30, 0)));

    let r = s.handle(&InputEvent::Key(EditKey::NextLiteral))?;
    assert_eq!(r.outcome, TextOutcome::Changed);
    assert_eq!(s.cursor(), 2);
    let r = s.handle(&InputEvent::Key(EditKey::PrevLiteral))?;
    assert_eq!(r.outcome, TextOutcome::Changed);
    assert_eq!(s.cursor(), 0);
    let r = s.handle(&InputEvent::Key(EditKey::PrevLiteral))?;
    assert_eq!(r.outcome, TextOutcome::Unchanged);

    let paste = InputEvent::Paste {
        range: 0..10,
        text: "01/02/2003".into(),
    };
    s.handle(&paste)?;
    assert_eq!(s.value(), Some(date(2003, 2, 1)));

    assert_eq!(s.handle(&InputEvent::Blur)?.outcome, TextOutcome::Changed);
    Ok(())
}

#[test]
fn test_config() -> Result<(), anyhow::Error> {
    let s = state(
        DateTimeConfig::default()
            .input_format("d/M/yy")
            .prompt_char('*'),
    );
    assert_eq!(s.input_format(), "dd/MM/yy");
    assert_eq!(s.text(), "**/**/**");

    assert_eq!(
        DateTimeInputState::from_config(DateTimeConfig::default().prompt_char('0')).err(),
        Some(MaskError::InvalidPromptChar('0'))
    );

    let mut s = ddmmyyyy();
    assert_eq!(
        s.replace_text(0..11, "").err(),
        Some(MaskError::TextRangeOutOfBounds(0, 11, 10))
    );

    s.set_value(Some(date(2020, 12, 24)));
    s.set_input_format("yyyy-MM-dd");
    assert_eq!(s.text(), "2020-12-24");
    s.set_display_format(Some("shortDate"));
    assert_eq!(s.text(), "12/24/20");
    Ok(())
}

#[test]
fn test_century_pivot() -> Result<(), anyhow::Error> {
    let mut s = state(
        DateTimeConfig::default()
            .input_format("dd/MM/yy")
            .century_pivot(30),
    );
    s.focus();
    s.replace_text(0..0, "010140")?;
    assert_eq!(s.value(), Some(date(1940, 1, 1)));
    s.replace_text(0..8, "010129")?;
    assert_eq!(s.value(), Some(date(2029, 1, 1)));
    Ok(())
}
