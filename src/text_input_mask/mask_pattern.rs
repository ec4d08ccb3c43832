use crate::text_input_mask::mask_token::Mask;
use crate::upos_type;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Debug, Formatter};
use unicode_segmentation::UnicodeSegmentation;

/// Compiled mask.
///
/// Every grapheme of the format string is either one of the slot
/// symbols or a literal. Positions are grapheme indices.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MaskPattern {
    mask: Vec<Mask>,
    // positions of the editable slots
    slots: Vec<upos_type>,
}

impl Debug for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "MaskPattern ")?;
        for m in &self.mask {
            write!(f, "{:?}", m)?;
        }
        Ok(())
    }
}

impl MaskPattern {
    /// Compile a mask format. Any string is a valid format.
    pub fn compile(format: &str) -> Self {
        Self::from_masks(format.graphemes(true).map(Mask::from_symbol).collect())
    }

    /// Construct from explicit mask tokens.
    ///
    /// This avoids ambiguities if a literal happens to be one of
    /// the slot symbols.
    pub fn from_masks(mask: Vec<Mask>) -> Self {
        let slots = mask
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_slot())
            .map(|(i, _)| i as upos_type)
            .collect();
        Self { mask, slots }
    }

    /// Length in graphemes.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.mask.len() as upos_type
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Number of editable positions.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Positions of all slots in ascending order.
    #[inline]
    pub fn slot_positions(&self) -> &[upos_type] {
        &self.slots
    }

    /// Positions and text of all literals.
    pub fn literal_positions(&self) -> BTreeMap<upos_type, &str> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.literal().map(|l| (i as upos_type, l)))
            .collect()
    }

    /// Slot class at the given position.
    ///
    /// Returns None for literals and for positions beyond the mask.
    #[inline]
    pub fn class_of(&self, pos: upos_type) -> Option<&Mask> {
        self.mask.get(pos as usize).filter(|m| m.is_slot())
    }

    /// Mask token at the given position.
    #[inline]
    pub fn mask_at(&self, pos: upos_type) -> Option<&Mask> {
        self.mask.get(pos as usize)
    }

    /// All tokens.
    #[inline]
    pub fn masks(&self) -> &[Mask] {
        &self.mask
    }

    /// Format string for this mask.
    pub fn format(&self) -> String {
        use std::fmt::Write;

        let mut buf = String::new();
        for m in self.mask.iter() {
            _ = write!(buf, "{}", m);
        }
        buf
    }
}
