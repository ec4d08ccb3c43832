use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// One char of the input mask.
#[allow(variant_size_differences)]
#[derive(Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mask {
    // 0: digit
    Digit,
    // 9: digit or space
    DigitSpace,
    // #: digit, plus or minus
    DigitSign,
    // L: letter
    Letter,
    // ?: letter or space
    LetterSpace,
    // A: letter or digit
    LetterOrDigit,
    // a: letter, digit or space
    LetterDigitSpace,
    // &: anything but whitespace
    NonSpace,
    // C: anything
    AnyChar,
    // everything else is shown as is and can't be edited.
    Literal(Box<str>),
}

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mask::Digit => "0",
            Mask::DigitSpace => "9",
            Mask::DigitSign => "#",
            Mask::Letter => "L",
            Mask::LetterSpace => "?",
            Mask::LetterOrDigit => "A",
            Mask::LetterDigitSpace => "a",
            Mask::NonSpace => "&",
            Mask::AnyChar => "C",
            Mask::Literal(s) => s.as_ref(),
        };
        write!(f, "{}", s)
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Literal(s) => write!(f, "\\{}", s),
            _ => write!(f, "{}", self),
        }
    }
}

impl Mask {
    /// Map one grapheme of a mask format.
    pub fn from_symbol(g: &str) -> Mask {
        match g {
            "0" => Mask::Digit,
            "9" => Mask::DigitSpace,
            "#" => Mask::DigitSign,
            "L" => Mask::Letter,
            "?" => Mask::LetterSpace,
            "A" => Mask::LetterOrDigit,
            "a" => Mask::LetterDigitSpace,
            "&" => Mask::NonSpace,
            "C" => Mask::AnyChar,
            s => Mask::Literal(Box::from(s)),
        }
    }

    /// Is this one of the slot symbols.
    pub fn is_slot_symbol(c: char) -> bool {
        matches!(c, '0' | '9' | '#' | 'L' | '?' | 'A' | 'a' | '&' | 'C')
    }

    /// Fixed text.
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Mask::Literal(_))
    }

    /// Editable position.
    #[inline]
    pub fn is_slot(&self) -> bool {
        !self.is_literal()
    }

    /// Does the grapheme fit this slot.
    /// Literals never accept input, they can only be matched.
    pub fn accepts(&self, g: &str) -> bool {
        let mut it = g.chars();
        let Some(c) = it.next() else {
            return false;
        };
        // combining marks may follow a letter, all other classes
        // want exactly one char.
        let single = it.next().is_none();

        match self {
            Mask::Digit => single && c.is_ascii_digit(),
            Mask::DigitSpace => single && (c.is_ascii_digit() || c == ' '),
            Mask::DigitSign => single && (c.is_ascii_digit() || c == '+' || c == '-'),
            Mask::Letter => c.is_alphabetic(),
            Mask::LetterSpace => c.is_alphabetic() || (single && c == ' '),
            Mask::LetterOrDigit => c.is_alphabetic() || (single && c.is_ascii_digit()),
            Mask::LetterDigitSpace => {
                c.is_alphabetic() || (single && (c.is_ascii_digit() || c == ' '))
            }
            Mask::NonSpace => !c.is_whitespace(),
            Mask::AnyChar => true,
            Mask::Literal(_) => false,
        }
    }

    /// The literal text.
    #[inline]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Mask::Literal(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}
