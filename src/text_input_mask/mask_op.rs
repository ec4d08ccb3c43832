use crate::text_input_mask::MaskOptions;
use crate::upos_type;
use std::cmp::min;
use unicode_segmentation::UnicodeSegmentation;

/// Result of [replace].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// New masked text.
    pub value: String,
    /// Cursor position after the edit.
    pub cursor: upos_type,
}

/// Replace the range `start..end` of the masked text with the
/// typed text.
///
/// This is used for every keystroke, paste and delete. A delete
/// is an empty `typed` text over the deleted range.
///
/// * Walks from `start` to the right.
/// * A literal consumes the next typed grapheme, if it's the
///   same literal. Otherwise the literal is skipped.
/// * A slot takes the next typed grapheme. If there is none
///   left the slot is cleared.
/// * A typed grapheme that doesn't fit its slot ends the edit.
///   Everything right of it stays as it was.
/// * The walk continues past `end` while there are typed graphemes
///   left, up to the end of the text.
///
/// The cursor is placed after the last consumed grapheme or at
/// `start` if nothing was consumed. The length of the text never
/// changes.
pub fn replace(
    previous: &str,
    typed: &str,
    options: &MaskOptions,
    start: upos_type,
    end: upos_type,
) -> Replaced {
    let prompt = options.prompt_str();
    let pattern = options.pattern();

    let mut value = previous.graphemes(true).collect::<Vec<_>>();
    let len = value.len() as upos_type;
    let end = min(end, len);

    let mut typed = typed.graphemes(true).peekable();
    let mut cursor = start;
    let mut pos = start;

    while pos < end || (typed.peek().is_some() && pos < len) {
        match pattern.class_of(pos) {
            None => {
                if typed.peek() == Some(&value[pos as usize]) {
                    typed.next();
                    cursor = pos + 1;
                }
            }
            Some(mask) => {
                if let Some(g) = typed.peek() {
                    if !mask.accepts(g) && *g != prompt {
                        break;
                    }
                }
                if let Some(g) = typed.next() {
                    value[pos as usize] = g;
                    cursor = pos + 1;
                } else {
                    value[pos as usize] = prompt;
                }
            }
        }
        pos += 1;
    }

    Replaced {
        value: value.concat(),
        cursor,
    }
}
