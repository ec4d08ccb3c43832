//!
//! Conversion between raw values and masked text.
//!

use crate::text_input_mask::MaskOptions;
use unicode_segmentation::UnicodeSegmentation;

/// Masked text with all slots showing the prompt char.
pub fn empty_mask(options: &MaskOptions) -> String {
    apply(None, options)
}

/// Fill the raw value into the slots of the mask.
///
/// The graphemes of the raw value are used for consecutive slots,
/// literals are skipped. A grapheme that doesn't fit its slot
/// leaves the slot empty but still uses it up. Anything beyond
/// the last slot is ignored.
pub fn apply(raw: Option<&str>, options: &MaskOptions) -> String {
    let mut raw = raw.unwrap_or_default().graphemes(true);
    let mut buf = String::new();
    for m in options.pattern().masks() {
        if let Some(lit) = m.literal() {
            buf.push_str(lit);
        } else {
            match raw.next() {
                Some(g) if m.accepts(g) => buf.push_str(g),
                _ => buf.push(options.prompt_char()),
            }
        }
    }
    buf
}

/// Strip the literals and the empty slots.
pub fn extract_raw(masked: &str, options: &MaskOptions) -> String {
    let pattern = options.pattern();
    let prompt = options.prompt_str();

    let mut buf = String::new();
    for (i, g) in masked.graphemes(true).enumerate() {
        if pattern.class_of(i as _).is_some() && g != prompt {
            buf.push_str(g);
        }
    }
    buf
}

/// Swap the prompt char of the empty slots.
///
/// Filled slots and literals stay where they are.
pub fn replace_prompt(masked: &str, old_prompt: char, options: &MaskOptions) -> String {
    let pattern = options.pattern();
    let mut old_buf = [0u8; 4];
    let old_prompt = old_prompt.encode_utf8(&mut old_buf);

    let mut buf = String::new();
    for (i, g) in masked.graphemes(true).enumerate() {
        if pattern.class_of(i as _).is_some() && g == old_prompt {
            buf.push(options.prompt_char());
        } else {
            buf.push_str(g);
        }
    }
    buf
}

/// Keeps the literals, strips the empty slots.
pub fn value_with_literals(masked: &str, options: &MaskOptions) -> String {
    let prompt = options.prompt_str();
    let pattern = options.pattern();

    let mut buf = String::new();
    for (i, g) in masked.graphemes(true).enumerate() {
        let is_slot = pattern.class_of(i as _).is_some();
        if !is_slot || g != prompt {
            buf.push_str(g);
        }
    }
    buf
}

/// All slots are filled.
pub fn is_complete(masked: &str, options: &MaskOptions) -> bool {
    let prompt = options.prompt_str();
    let pattern = options.pattern();

    !masked
        .graphemes(true)
        .enumerate()
        .any(|(i, g)| pattern.class_of(i as _).is_some() && g == prompt)
}
