//! Text editing with an input mask.
//!
//! * Accepts an input mask:
//!   * `0`: digit
//!   * `9`: digit or space
//!   * `#`: digit, plus or minus sign
//!   * `L`: letter
//!   * `?`: letter or space
//!   * `A`: letter or digit
//!   * `a`: letter, digit or space
//!   * `&`: anything but whitespace
//!   * `C`: anything
//!
//!   * everything else is a literal. Literals can't be edited, but
//!     typing a literal moves the cursor across it.
//!
//! * Empty slots show the prompt char, `_` by default.
//!
//! ```rust
//! use rat_mask::text_input_mask::MaskedInputState;
//!
//! let mut state = MaskedInputState::new().with_mask("(000) 000-0000")?;
//! state.set_cursor(0, false);
//! state.insert_str("555123");
//! assert_eq!(state.text(), "(555) 123-____");
//! assert_eq!(state.value(), "555123");
//! # Ok::<(), rat_mask::MaskError>(())
//! ```
//!
//! The editing itself is done by [mask_op::replace], the conversion
//! between raw value and masked text by [mask_codec].
//!

use crate::_private::NonExhaustive;
use crate::event::TextOutcome;
use crate::text_input_mask::mask_pattern::MaskPattern;
use crate::text_input_mask::mask_token::Mask;
use crate::{MaskError, upos_type};
use log::debug;
use std::cmp::{max, min};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

pub mod mask_codec;
pub mod mask_op;
pub mod mask_pattern;
pub mod mask_token;

/// Default prompt char.
pub const PROMPT_CHAR: char = '_';

/// Mask and prompt char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOptions {
    pattern: MaskPattern,
    prompt: char,
    prompt_str: String,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            pattern: Default::default(),
            prompt: PROMPT_CHAR,
            prompt_str: PROMPT_CHAR.to_string(),
        }
    }
}

impl MaskOptions {
    /// New options for a mask format.
    ///
    /// Fails if the prompt char is one of the slot symbols.
    pub fn new(format: &str, prompt: char) -> Result<Self, MaskError> {
        Self::from_pattern(MaskPattern::compile(format), prompt)
    }

    /// New options for an already compiled mask.
    pub fn from_pattern(pattern: MaskPattern, prompt: char) -> Result<Self, MaskError> {
        if Mask::is_slot_symbol(prompt) {
            return Err(MaskError::InvalidPromptChar(prompt));
        }
        Ok(Self {
            pattern,
            prompt,
            prompt_str: prompt.to_string(),
        })
    }

    /// Compiled mask.
    #[inline]
    pub fn pattern(&self) -> &MaskPattern {
        &self.pattern
    }

    /// Mask format.
    #[inline]
    pub fn format(&self) -> String {
        self.pattern.format()
    }

    /// Placeholder for empty slots.
    #[inline]
    pub fn prompt_char(&self) -> char {
        self.prompt
    }

    /// Placeholder for empty slots.
    #[inline]
    pub fn prompt_str(&self) -> &str {
        self.prompt_str.as_str()
    }
}

/// Normalized input events.
///
/// The event source has already translated keys into edits.
/// Backspace and delete are an `Input` with empty text over the
/// range that is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Focus,
    Blur,
    /// Typed text replaces the range.
    Input {
        range: Range<upos_type>,
        text: String,
    },
    /// Pasted text replaces the range.
    Paste {
        range: Range<upos_type>,
        text: String,
    },
    Key(EditKey),
}

/// Keys with special meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Arrow up or wheel up.
    Up,
    /// Arrow down or wheel down.
    Down,
    /// Ctrl+Left
    PrevLiteral,
    /// Ctrl+Right
    NextLiteral,
    /// Ctrl+;
    Now,
}

/// State of a masked text input.
#[derive(Debug, Clone)]
pub struct MaskedInputState {
    options: MaskOptions,
    text: String,
    anchor: upos_type,
    cursor: upos_type,

    /// Has the focus.
    /// __read only__ use focus_gained()/focus_lost().
    pub focused: bool,
    /// value() includes the literals.
    /// __read+write__
    pub include_literals: bool,
    /// Display as invalid.
    /// __read+write__
    pub invalid: bool,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskedInputState {
    fn default() -> Self {
        Self {
            options: Default::default(),
            text: Default::default(),
            anchor: 0,
            cursor: 0,
            focused: false,
            include_literals: false,
            invalid: false,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskedInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// With a mask format.
    pub fn with_mask<S: AsRef<str>>(mut self, mask: S) -> Result<Self, MaskError> {
        self.set_mask(mask)?;
        Ok(self)
    }

    /// With a different prompt char.
    pub fn with_prompt_char(mut self, prompt: char) -> Result<Self, MaskError> {
        self.set_prompt_char(prompt)?;
        Ok(self)
    }

    /// Set the mask format.
    /// Resets the value.
    pub fn set_mask<S: AsRef<str>>(&mut self, mask: S) -> Result<(), MaskError> {
        self.set_options(MaskOptions::new(mask.as_ref(), self.options.prompt_char())?);
        Ok(())
    }

    /// Set a compiled mask.
    /// Resets the value.
    pub fn set_pattern(&mut self, pattern: MaskPattern) -> Result<(), MaskError> {
        self.set_options(MaskOptions::from_pattern(pattern, self.options.prompt_char())?);
        Ok(())
    }

    /// Set the prompt char.
    /// Empty slots keep being empty.
    pub fn set_prompt_char(&mut self, prompt: char) -> Result<(), MaskError> {
        let old_prompt = self.options.prompt_char();
        self.options = MaskOptions::from_pattern(self.options.pattern().clone(), prompt)?;
        self.text = mask_codec::replace_prompt(&self.text, old_prompt, &self.options);
        Ok(())
    }

    fn set_options(&mut self, options: MaskOptions) {
        self.options = options;
        self.text = mask_codec::empty_mask(&self.options);
        self.anchor = 0;
        self.cursor = 0;
    }

    /// Mask and prompt char.
    #[inline]
    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Mask format.
    #[inline]
    pub fn mask(&self) -> String {
        self.options.format()
    }

    /// Prompt char.
    #[inline]
    pub fn prompt_char(&self) -> char {
        self.options.prompt_char()
    }
}

impl MaskedInputState {
    /// Cursor position.
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Selection anchor.
    #[inline]
    pub fn anchor(&self) -> upos_type {
        self.anchor
    }

    /// Set the cursor position. The value is capped to the length
    /// of the text.
    ///
    /// Returns true, if the cursor actually changed.
    pub fn set_cursor(&mut self, cursor: upos_type, extend_selection: bool) -> bool {
        let old = (self.anchor, self.cursor);
        self.cursor = min(cursor, self.len());
        if !extend_selection {
            self.anchor = self.cursor;
        }
        old != (self.anchor, self.cursor)
    }

    /// Selection.
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Selection as ascending range.
    #[inline]
    pub fn selection(&self) -> Range<upos_type> {
        min(self.anchor, self.cursor)..max(self.anchor, self.cursor)
    }

    /// Set the selection.
    pub fn set_selection(&mut self, anchor: upos_type, cursor: upos_type) -> bool {
        let old = (self.anchor, self.cursor);
        self.anchor = min(anchor, self.len());
        self.cursor = min(cursor, self.len());
        old != (self.anchor, self.cursor)
    }

    /// Select everything.
    pub fn select_all(&mut self) -> bool {
        self.set_selection(0, self.len())
    }
}

impl MaskedInputState {
    /// Masked text.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Length in graphemes.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.text.graphemes(true).count() as upos_type
    }

    /// No slot is filled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        mask_codec::extract_raw(&self.text, &self.options).is_empty()
    }

    /// All slots are filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        mask_codec::is_complete(&self.text, &self.options)
    }

    /// The text is the empty mask.
    #[inline]
    pub fn is_empty_mask(&self) -> bool {
        self.text == mask_codec::empty_mask(&self.options)
    }

    /// Value. With or without literals depending on `include_literals`.
    pub fn value(&self) -> String {
        if self.include_literals {
            mask_codec::value_with_literals(&self.text, &self.options)
        } else {
            mask_codec::extract_raw(&self.text, &self.options)
        }
    }

    /// Set the raw value.
    /// Literals in the value are expected if `include_literals` is set.
    pub fn set_value<S: AsRef<str>>(&mut self, value: S) {
        let value = value.as_ref();
        if self.include_literals {
            let empty = mask_codec::empty_mask(&self.options);
            let len = self.options.pattern().len();
            self.text = mask_op::replace(&empty, value, &self.options, 0, len).value;
        } else {
            self.text = mask_codec::apply(Some(value), &self.options);
        }
        self.set_cursor(self.cursor, false);
    }

    /// Set the masked text directly.
    ///
    /// The text is run through the mask, graphemes that don't fit
    /// end the text.
    pub fn set_text<S: AsRef<str>>(&mut self, text: S) {
        let empty = mask_codec::empty_mask(&self.options);
        self.text = mask_op::replace(
            &empty,
            text.as_ref(),
            &self.options,
            0,
            self.options.pattern().len(),
        )
        .value;
        self.set_cursor(self.cursor, false);
    }

    /// Reset to the empty mask.
    pub fn clear(&mut self) -> bool {
        if self.is_empty_mask() {
            false
        } else {
            self.text = mask_codec::empty_mask(&self.options);
            self.anchor = 0;
            self.cursor = 0;
            true
        }
    }

    /// Replace the range with the given text.
    ///
    /// Fails if the range is reversed or beyond the text.
    pub fn replace_text(
        &mut self,
        range: Range<upos_type>,
        typed: &str,
    ) -> Result<TextOutcome, MaskError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(MaskError::TextRangeOutOfBounds(range.start, range.end, len));
        }

        let r = mask_op::replace(&self.text, typed, &self.options, range.start, range.end);
        self.cursor = r.cursor;
        self.anchor = r.cursor;
        if r.value != self.text {
            self.text = r.value;
            Ok(TextOutcome::TextChanged)
        } else {
            Ok(TextOutcome::Changed)
        }
    }

    /// Insert text at the cursor, replaces the selection.
    pub fn insert_str(&mut self, typed: &str) -> TextOutcome {
        let range = self.selection();
        // the selection is always within bounds.
        self.replace_text(range, typed).unwrap_or(TextOutcome::Unchanged)
    }

    /// Backspace. Removes the selection or the grapheme before the cursor.
    pub fn delete_prev_char(&mut self) -> TextOutcome {
        let range = if self.has_selection() {
            self.selection()
        } else if self.cursor > 0 {
            self.cursor - 1..self.cursor
        } else {
            return TextOutcome::Unchanged;
        };
        self.replace_text(range, "").unwrap_or(TextOutcome::Unchanged)
    }

    /// Delete. Removes the selection or the grapheme after the cursor.
    pub fn delete_next_char(&mut self) -> TextOutcome {
        let range = if self.has_selection() {
            self.selection()
        } else if self.cursor < self.len() {
            self.cursor..self.cursor + 1
        } else {
            return TextOutcome::Unchanged;
        };
        let outcome = self
            .replace_text(range.clone(), "")
            .unwrap_or(TextOutcome::Unchanged);
        // delete keeps the cursor where it was.
        self.set_cursor(range.start, false);
        outcome
    }
}

impl MaskedInputState {
    /// Focus gained.
    pub fn focus_gained(&mut self) -> bool {
        debug!("masked input focus gained");
        let changed = !self.focused;
        self.focused = true;
        changed
    }

    /// Focus lost.
    pub fn focus_lost(&mut self) -> bool {
        debug!("masked input focus lost");
        let changed = self.focused;
        self.focused = false;
        changed
    }

    /// Handle a normalized input event.
    ///
    /// Text events are only processed with the focus.
    pub fn handle(&mut self, event: &InputEvent) -> Result<TextOutcome, MaskError> {
        match event {
            InputEvent::Focus => Ok(self.focus_gained().into()),
            InputEvent::Blur => Ok(self.focus_lost().into()),
            InputEvent::Input { range, text } | InputEvent::Paste { range, text } => {
                if self.focused {
                    self.replace_text(range.clone(), text)
                } else {
                    Ok(TextOutcome::Continue)
                }
            }
            InputEvent::Key(_) => Ok(TextOutcome::Continue),
        }
    }
}
