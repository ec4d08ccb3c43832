#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use crate::date_input::DatePart;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod date_input;
pub mod text_input_mask;

pub use pure_rust_locales::Locale;

pub mod event {
    //!
    //! Results of editing operations.
    //!

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it. Cursor movement, focus change.
        Changed,
        /// Text content has changed.
        TextChanged,
    }

    impl TextOutcome {
        /// The event has been used in some way.
        pub fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }
}

/// Errors for misuse of the editing api.
///
/// Invalid user input is never reported this way. Keystrokes
/// that don't fit the mask are dropped and invalid dates are
/// reported with a [ValidationFailed](date_input::DateTimeEvent::ValidationFailed)
/// event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The prompt char is one of the slot symbols of the mask alphabet.
    InvalidPromptChar(char),
    /// The edit range is reversed or exceeds the text.
    ///
    /// Contains start, end and the length of the text in graphemes.
    TextRangeOutOfBounds(upos_type, upos_type, upos_type),
    /// A literal part was used where a date/time field is needed.
    NotAField(DatePart),
    /// A format pattern could not be used.
    InvalidFormat(String),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Column type. Offsets into a masked text count graphemes.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
