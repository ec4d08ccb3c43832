//!
//! Date/time input on top of [MaskedInputState].
//!
//! The input format (e.g. `dd/MM/yyyy HH:mm`) is turned into an
//! input mask. While focused the user edits the masked text,
//! and every edit is parsed back into a value.
//!
//! Without the focus the value is shown with the display format.
//!
//! ```
//! use chrono::NaiveDate;
//! use rat_mask::date_input::{DateTimeConfig, DateTimeInputState};
//!
//! let mut state = DateTimeInputState::from_config(
//!     DateTimeConfig::default().input_format("dd/MM/yyyy"),
//! )
//! .expect("config");
//! state.focus();
//! state.replace_text(0..0, "24122020").expect("edit");
//!
//! assert_eq!(state.text(), "24/12/2020");
//! assert_eq!(
//!     state.value(),
//!     NaiveDate::from_ymd_opt(2020, 12, 24).and_then(|v| v.and_hms_opt(0, 0, 0))
//! );
//! ```
//!

use crate::_private::NonExhaustive;
use crate::event::TextOutcome;
use crate::text_input_mask::{EditKey, InputEvent, MaskedInputState};
use crate::{Locale, MaskError, upos_type};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::ops::Range;

pub mod date_display;
pub mod date_format;
pub mod date_parse;
pub mod date_spin;

pub use date_display::{
    ChronoFormatter, DateFormatter, default_input_format, input_format_from_strftime,
    predefined_format, strftime_pattern,
};
pub use date_format::{
    DatePart, DatePartInfo, default_part, edit_mask, has_date_parts, has_time_parts,
    is_date_or_time_char, literal_boundary, normalized_format, parse_date_time_format, part_value,
    render_value, target_part,
};
pub use date_parse::{
    DateState, ParseOptions, ParseResult, RangeErrors, greater_than_max_value, less_than_min_value,
    parse, parse_iso_date, validate_min_max,
};
pub use date_spin::{
    days_in_month, spin, spin_am_pm, spin_date, spin_hours, spin_minutes, spin_month, spin_seconds,
    spin_year, try_spin,
};

/// Min/max value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    Date(NaiveDateTime),
    /// ISO date/time or text in the input format.
    Text(String),
}

impl From<NaiveDateTime> for DateBound {
    fn from(value: NaiveDateTime) -> Self {
        DateBound::Date(value)
    }
}

impl From<NaiveDate> for DateBound {
    fn from(value: NaiveDate) -> Self {
        DateBound::Date(value.and_time(Default::default()))
    }
}

impl From<&str> for DateBound {
    fn from(value: &str) -> Self {
        DateBound::Text(value.to_string())
    }
}

impl From<String> for DateBound {
    fn from(value: String) -> Self {
        DateBound::Text(value)
    }
}

/// Configuration for [DateTimeInputState].
#[derive(Debug, Clone)]
pub struct DateTimeConfig {
    /// Marks empty slots.
    pub prompt_char: char,
    /// Format for editing. Defaults to the date format of the locale.
    pub input_format: Option<String>,
    /// Format for display. Defaults to the input format.
    pub display_format: Option<String>,
    pub min_value: Option<DateBound>,
    pub max_value: Option<DateBound>,
    /// Spinning wraps around.
    pub is_spin_loop: bool,
    pub locale: Locale,
    /// Two-digit years below this are 20xx.
    pub century_pivot: u32,

    pub non_exhaustive: NonExhaustive,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            prompt_char: '_',
            input_format: None,
            display_format: None,
            min_value: None,
            max_value: None,
            is_spin_loop: true,
            locale: Default::default(),
            century_pivot: 50,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl DateTimeConfig {
    pub fn prompt_char(mut self, prompt: char) -> Self {
        self.prompt_char = prompt;
        self
    }

    pub fn input_format(mut self, format: impl Into<String>) -> Self {
        self.input_format = Some(format.into());
        self
    }

    pub fn display_format(mut self, format: impl Into<String>) -> Self {
        self.display_format = Some(format.into());
        self
    }

    pub fn min_value(mut self, min: impl Into<DateBound>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    pub fn max_value(mut self, max: impl Into<DateBound>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    pub fn spin_loop(mut self, is_loop: bool) -> Self {
        self.is_spin_loop = is_loop;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn century_pivot(mut self, pivot: u32) -> Self {
        self.century_pivot = pivot;
        self
    }
}

/// Notifications from the date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeEvent {
    /// The value changed.
    ValueChanged {
        old: Option<NaiveDateTime>,
        new: Option<NaiveDateTime>,
    },
    /// The input can't be parsed or is out of range.
    /// The new value has been stored nevertheless.
    ValidationFailed {
        old: Option<NaiveDateTime>,
        new: Option<NaiveDateTime>,
        user_input: String,
    },
}

/// Result of an operation on the date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub outcome: TextOutcome,
    pub events: Vec<DateTimeEvent>,
}

impl EditResult {
    fn new(outcome: TextOutcome, events: Vec<DateTimeEvent>) -> Self {
        Self { outcome, events }
    }

    fn outcome(outcome: TextOutcome) -> Self {
        Self::new(outcome, Vec::new())
    }

    /// Some ValueChanged event.
    pub fn value_changed(&self) -> bool {
        self.events
            .iter()
            .any(|v| matches!(v, DateTimeEvent::ValueChanged { .. }))
    }

    /// Some ValidationFailed event.
    pub fn validation_failed(&self) -> bool {
        self.events
            .iter()
            .any(|v| matches!(v, DateTimeEvent::ValidationFailed { .. }))
    }
}

impl From<TextOutcome> for EditResult {
    fn from(value: TextOutcome) -> Self {
        Self::outcome(value)
    }
}

impl From<bool> for EditResult {
    fn from(value: bool) -> Self {
        Self::outcome(TextOutcome::from(value))
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// State of a date/time input.
#[derive(Debug)]
pub struct DateTimeInputState {
    /// Uses MaskedInputState for the text editing.
    /// __read only__
    pub widget: MaskedInputState,

    parts: Vec<DatePartInfo>,
    input_format: String,
    display_format: Option<String>,
    locale: Locale,
    century_pivot: u32,

    min_bound: Option<DateBound>,
    max_bound: Option<DateBound>,
    min_value: Option<NaiveDateTime>,
    max_value: Option<NaiveDateTime>,

    value: Option<NaiveDateTime>,
    old_value: Option<NaiveDateTime>,
    // last value sent with ValueChanged
    notified: Option<NaiveDateTime>,
    state: DateState,
    display: String,

    formatter: Box<dyn DateFormatter>,
    clock: fn() -> NaiveDateTime,

    /// Spinning wraps around.
    /// __read+write__
    pub is_spin_loop: bool,

    pub non_exhaustive: NonExhaustive,
}

impl Default for DateTimeInputState {
    fn default() -> Self {
        Self {
            widget: Default::default(),
            parts: Default::default(),
            input_format: Default::default(),
            display_format: None,
            locale: Default::default(),
            century_pivot: 50,
            min_bound: None,
            max_bound: None,
            min_value: None,
            max_value: None,
            value: None,
            old_value: None,
            notified: None,
            state: DateState::Valid,
            display: Default::default(),
            formatter: Box::new(ChronoFormatter),
            clock: local_now,
            is_spin_loop: true,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl DateTimeInputState {
    /// New state with the date format of the default locale.
    pub fn new() -> Self {
        let mut z = Self::default();
        let format = default_input_format(z.locale);
        z.apply_format(&format);
        z
    }

    /// New state from the configuration.
    pub fn from_config(config: DateTimeConfig) -> Result<Self, MaskError> {
        let mut z = Self::default();
        z.set_config(config)?;
        Ok(z)
    }

    /// Use a different clock for "now".
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self.resolve_bounds();
        self
    }

    /// Use a different display formatter.
    pub fn with_formatter(mut self, formatter: Box<dyn DateFormatter>) -> Self {
        self.formatter = formatter;
        self.render();
        self
    }

    /// Apply the configuration. The value is kept.
    ///
    /// Fails if the prompt char can't be used.
    pub fn set_config(&mut self, config: DateTimeConfig) -> Result<(), MaskError> {
        self.widget.set_prompt_char(config.prompt_char)?;
        self.locale = config.locale;
        self.century_pivot = config.century_pivot;
        self.is_spin_loop = config.is_spin_loop;
        self.display_format = config.display_format;
        self.min_bound = config.min_value;
        self.max_bound = config.max_value;

        let format = match config.input_format {
            Some(f) => f,
            None => default_input_format(self.locale),
        };
        self.apply_format(&format);
        Ok(())
    }

    /// Change the input format. The value is kept.
    pub fn set_input_format<S: AsRef<str>>(&mut self, format: S) {
        self.apply_format(format.as_ref());
    }

    /// Change the display format.
    pub fn set_display_format<S: AsRef<str>>(&mut self, format: Option<S>) {
        self.display_format = format.map(|v| v.as_ref().to_string());
        self.render();
    }

    /// Set the min value.
    pub fn set_min_value(&mut self, min: Option<DateBound>) {
        self.min_bound = min;
        self.resolve_bounds();
    }

    /// Set the max value.
    pub fn set_max_value(&mut self, max: Option<DateBound>) {
        self.max_bound = max;
        self.resolve_bounds();
    }

    fn apply_format(&mut self, format: &str) {
        self.parts = parse_date_time_format(format);
        self.input_format = normalized_format(&self.parts);
        // the prompt has been checked already, the mask contains no symbols.
        if let Err(e) = self.widget.set_pattern(edit_mask(&self.parts)) {
            warn!("date input mask {:?}: {}", self.input_format, e);
        }
        debug!("date input format {:?}", self.input_format);
        self.resolve_bounds();
        self.render();
    }

    // Normalize min/max.
    fn resolve_bounds(&mut self) {
        self.min_value = self.resolve_bound(self.min_bound.as_ref());
        self.max_value = self.resolve_bound(self.max_bound.as_ref());
    }

    fn resolve_bound(&self, bound: Option<&DateBound>) -> Option<NaiveDateTime> {
        match bound? {
            DateBound::Date(v) => Some(*v),
            DateBound::Text(s) => {
                if let Some(v) = parse_iso_date(s, (self.clock)().date()) {
                    return Some(v);
                }
                let r = parse(&self.parts, s, &self.parse_options());
                if r.state == DateState::Valid && r.value.is_some() {
                    r.value
                } else {
                    warn!("unusable min/max value {:?}", s);
                    None
                }
            }
        }
    }
}

impl DateTimeInputState {
    /// Normalized input format.
    #[inline]
    pub fn input_format(&self) -> &str {
        self.input_format.as_str()
    }

    /// Display format, if any.
    #[inline]
    pub fn display_format(&self) -> Option<&str> {
        self.display_format.as_deref()
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Fields and literals of the input format.
    #[inline]
    pub fn parts(&self) -> &[DatePartInfo] {
        &self.parts
    }

    #[inline]
    pub fn min_value(&self) -> Option<NaiveDateTime> {
        self.min_value
    }

    #[inline]
    pub fn max_value(&self) -> Option<NaiveDateTime> {
        self.max_value
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Value before the last change.
    #[inline]
    pub fn old_value(&self) -> Option<NaiveDateTime> {
        self.old_value
    }

    /// Result of the last parse.
    #[inline]
    pub fn state(&self) -> DateState {
        self.state
    }

    /// Has the focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.widget.focused
    }

    /// Masked text while focused, the display text otherwise.
    #[inline]
    pub fn text(&self) -> &str {
        if self.widget.focused {
            self.widget.text()
        } else {
            self.display.as_str()
        }
    }

    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.widget.cursor()
    }

    /// Set the cursor position.
    #[inline]
    pub fn set_cursor(&mut self, cursor: upos_type) -> bool {
        self.widget.set_cursor(cursor, false)
    }

    /// Range check.
    pub fn range_errors(&self) -> RangeErrors {
        validate_min_max(
            self.value.as_ref(),
            self.min_value.as_ref(),
            self.max_value.as_ref(),
            has_time_parts(&self.parts),
            has_date_parts(&self.parts),
        )
    }

    /// Complete input, parses, and is in range.
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
            && self.widget.is_complete()
            && self.state == DateState::Valid
            && self.range_errors().is_empty()
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            prompt_char: self.widget.prompt_char(),
            century_pivot: self.century_pivot,
            reference_year: (self.clock)().year(),
        }
    }
}

impl DateTimeInputState {
    /// Focus gained. Shows the value with the input format.
    pub fn focus(&mut self) -> EditResult {
        let changed = self.widget.focus_gained();
        self.render();
        changed.into()
    }

    /// Focus lost.
    ///
    /// Incomplete input is parsed one more time. Shows the value
    /// with the display format afterwards.
    pub fn blur(&mut self) -> EditResult {
        let changed = self.widget.focus_lost();

        let mut events = Vec::new();
        if !self.widget.is_complete() && !self.widget.is_empty() {
            let user_input = self.widget.text().to_string();
            let r = parse(&self.parts, &user_input, &self.parse_options());
            self.state = r.state;
            if r.state != DateState::Valid {
                events.push(Self::failed_event(self.value, r.value, &user_input));
            }
            self.commit(r.value, true, &user_input, &mut events);
        } else if !self.range_errors().is_empty() {
            events.push(Self::failed_event(self.value, self.value, self.widget.text()));
        }
        self.render();

        EditResult::new(changed.into(), events)
    }

    /// Replace the range of the masked text.
    ///
    /// This is the common path for typing, pasting and deleting.
    pub fn replace_text(
        &mut self,
        range: Range<upos_type>,
        text: &str,
    ) -> Result<EditResult, MaskError> {
        let outcome = self.widget.replace_text(range, text)?;
        if outcome != TextOutcome::TextChanged {
            return Ok(outcome.into());
        }

        let mut events = Vec::new();
        let user_input = self.widget.text().to_string();
        let new_value = if self.widget.is_empty() {
            self.state = DateState::Valid;
            None
        } else {
            let r = parse(&self.parts, &user_input, &self.parse_options());
            self.state = r.state;
            if r.state != DateState::Valid {
                events.push(Self::failed_event(self.value, r.value, &user_input));
            }
            r.value
        };
        let notify = self.widget.is_complete() || self.widget.is_empty();
        self.commit(new_value, notify, &user_input, &mut events);
        // the edit buffer stays as typed.
        self.display = self.display_text();

        Ok(EditResult::new(outcome, events))
    }

    /// Spin the given part.
    ///
    /// Without a value the value is set to now.
    pub fn spin(&mut self, part: DatePart, delta: i32) -> Result<EditResult, MaskError> {
        let new_value = match try_spin(part, delta, self.value, self.is_spin_loop)? {
            Some(v) => v,
            None => (self.clock)(),
        };
        Ok(self.set_and_notify(Some(new_value)))
    }

    /// Spin up. Without a part the part at the cursor is used, or
    /// Day/Hours if not focused.
    pub fn increment(&mut self, part: Option<DatePart>) -> Result<EditResult, MaskError> {
        match part.or_else(|| self.target_part()) {
            Some(part) => self.spin(part, 1),
            None => Ok(TextOutcome::Unchanged.into()),
        }
    }

    /// Spin down. Without a part the part at the cursor is used, or
    /// Day/Hours if not focused.
    pub fn decrement(&mut self, part: Option<DatePart>) -> Result<EditResult, MaskError> {
        match part.or_else(|| self.target_part()) {
            Some(part) => self.spin(part, -1),
            None => Ok(TextOutcome::Unchanged.into()),
        }
    }

    /// Part used for increment/decrement.
    pub fn target_part(&self) -> Option<DatePart> {
        if self.widget.focused {
            target_part(&self.parts, self.widget.cursor())
        } else {
            default_part(&self.parts)
        }
    }

    /// Set the value to now.
    pub fn set_now(&mut self) -> EditResult {
        let now = (self.clock)();
        self.set_and_notify(Some(now))
    }

    /// Clear the value.
    pub fn clear(&mut self) -> EditResult {
        self.state = DateState::Valid;
        self.widget.clear();
        self.set_and_notify(None)
    }

    /// Set the value. Sends no events.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.old_value = self.value;
        self.value = value;
        self.notified = value;
        self.state = DateState::Valid;
        if value.is_none() {
            self.widget.clear();
        }
        self.render();
    }

    /// Move the cursor to the previous literal.
    pub fn move_to_prev_literal(&mut self) -> bool {
        let pos = literal_boundary(&self.parts, self.widget.cursor(), false, self.widget.len());
        self.widget.set_cursor(pos, false)
    }

    /// Move the cursor to the next literal.
    pub fn move_to_next_literal(&mut self) -> bool {
        let pos = literal_boundary(&self.parts, self.widget.cursor(), true, self.widget.len());
        self.widget.set_cursor(pos, false)
    }

    /// Handle a normalized input event.
    ///
    /// Text events and keys are only processed with the focus.
    pub fn handle(&mut self, event: &InputEvent) -> Result<EditResult, MaskError> {
        match event {
            InputEvent::Focus => Ok(self.focus()),
            InputEvent::Blur => Ok(self.blur()),
            _ if !self.widget.focused => Ok(TextOutcome::Continue.into()),
            InputEvent::Input { range, text } | InputEvent::Paste { range, text } => {
                self.replace_text(range.clone(), text)
            }
            InputEvent::Key(EditKey::Up) => self.increment(None),
            InputEvent::Key(EditKey::Down) => self.decrement(None),
            InputEvent::Key(EditKey::Now) => Ok(self.set_now()),
            InputEvent::Key(EditKey::PrevLiteral) => Ok(self.move_to_prev_literal().into()),
            InputEvent::Key(EditKey::NextLiteral) => Ok(self.move_to_next_literal().into()),
        }
    }

    fn set_and_notify(&mut self, value: Option<NaiveDateTime>) -> EditResult {
        let mut events = Vec::new();
        let old = self.value;
        self.state = DateState::Valid;
        let user_input = self.widget.text().to_string();
        self.commit(value, true, &user_input, &mut events);
        self.render();

        let outcome = if old != self.value {
            TextOutcome::TextChanged
        } else {
            TextOutcome::Unchanged
        };
        EditResult::new(outcome, events)
    }

    // Store the new value.
    fn commit(
        &mut self,
        value: Option<NaiveDateTime>,
        notify: bool,
        user_input: &str,
        events: &mut Vec<DateTimeEvent>,
    ) {
        let old = self.value;
        self.old_value = old;
        self.value = value;

        if value.is_some() && !self.range_errors().is_empty() {
            debug!("date input out of range {:?}", value);
            events.push(Self::failed_event(old, value, user_input));
        }
        if notify && self.notified != value {
            debug!("date input value {:?} -> {:?}", self.notified, value);
            events.push(DateTimeEvent::ValueChanged {
                old: self.notified,
                new: value,
            });
            self.notified = value;
        }
    }

    fn failed_event(
        old: Option<NaiveDateTime>,
        new: Option<NaiveDateTime>,
        user_input: &str,
    ) -> DateTimeEvent {
        DateTimeEvent::ValidationFailed {
            old,
            new,
            user_input: user_input.to_string(),
        }
    }

    // Update the edit buffer and the display from the value.
    fn render(&mut self) {
        if let Some(value) = &self.value {
            let text = render_value(value, &self.parts, self.widget.options());
            self.widget.set_text(text);
        } else if !self.widget.focused {
            self.widget.clear();
        }
        self.display = self.display_text();
    }

    fn display_text(&self) -> String {
        match &self.value {
            Some(value) => {
                let format = self.display_format.as_deref().unwrap_or(&self.input_format);
                self.formatter.format_date(value, format, self.locale)
            }
            None => self.widget.text().to_string(),
        }
    }
}

/// Handle a normalized input event.
pub fn handle_events(
    state: &mut DateTimeInputState,
    event: &InputEvent,
) -> Result<EditResult, MaskError> {
    state.handle(event)
}
