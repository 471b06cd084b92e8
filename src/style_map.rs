// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Value;

/// Per-property bit flags.
pub mod flags {
    /// The declaration was `!important`.
    pub const IMPORTANT: u16 = 0x0001;
    /// The value is computed.
    pub const COMPUTED: u16 = 0x0002;
    /// No declaration applied, the value is the default one.
    pub const NULL_CASCADED: u16 = 0x0004;
    /// The value was taken from the parent.
    pub const INHERITED: u16 = 0x0008;
    /// The value depends on the element font size.
    pub const FONT_SIZE_RELATIVE: u16 = 0x0020;
    /// The value depends on `color`.
    pub const COLOR_RELATIVE: u16 = 0x0040;
    /// The value depends on the parent style.
    pub const PARENT_RELATIVE: u16 = 0x0080;
    /// The value depends on the viewport width.
    pub const BLOCK_WIDTH_RELATIVE: u16 = 0x0100;
    /// The value depends on the viewport height.
    pub const BLOCK_HEIGHT_RELATIVE: u16 = 0x0200;

    pub(crate) const ORIGIN_MASK: u16 = 0xE000;
    pub(crate) const ORIGIN_SHIFT: u16 = 13;
}

/// A declaration origin, from the weakest to the strongest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Origin {
    /// The built-in style sheet.
    UserAgent,
    /// [`Options::user_style_sheet`](crate::Options::user_style_sheet).
    User,
    /// An SVG presentation attribute, like `fill="red"`.
    PresentationAttribute,
    /// A `<style>` element or an external style sheet.
    Author,
    /// A `style` attribute.
    InlineStyle,
}

impl Origin {
    fn from_bits(bits: u16) -> Self {
        match bits {
            1 => Origin::User,
            2 => Origin::PresentationAttribute,
            3 => Origin::Author,
            4 => Origin::InlineStyle,
            _ => Origin::UserAgent,
        }
    }

    fn to_bits(self) -> u16 {
        match self {
            Origin::UserAgent => 0,
            Origin::User => 1,
            Origin::PresentationAttribute => 2,
            Origin::Author => 3,
            Origin::InlineStyle => 4,
        }
    }
}

/// Property values of a single element, indexed by the registry property index.
#[derive(Clone, PartialEq, Debug)]
pub struct StyleMap {
    values: Vec<Option<Value>>,
    masks: Vec<u16>,
}

impl StyleMap {
    /// Creates an empty map for `size` properties.
    pub fn new(size: usize) -> Self {
        StyleMap {
            values: vec![None; size],
            masks: vec![0; size],
        }
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks that the map has no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a value.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(|v| v.as_ref())
    }

    /// Returns the flags of a value.
    #[inline]
    pub fn mask(&self, index: usize) -> u16 {
        self.masks.get(index).copied().unwrap_or(0)
    }

    #[inline]
    fn has(&self, index: usize, flag: u16) -> bool {
        self.mask(index) & flag != 0
    }

    /// Checks that the value comes from an `!important` declaration.
    pub fn is_important(&self, index: usize) -> bool {
        self.has(index, flags::IMPORTANT)
    }

    /// Checks that the value is computed.
    pub fn is_computed(&self, index: usize) -> bool {
        self.has(index, flags::COMPUTED)
    }

    /// Checks that no declaration applied to the property.
    pub fn is_null_cascaded(&self, index: usize) -> bool {
        self.has(index, flags::NULL_CASCADED)
    }

    /// Checks that the value was inherited from the parent.
    pub fn is_inherited(&self, index: usize) -> bool {
        self.has(index, flags::INHERITED)
    }

    /// Checks that the value depends on the element font size.
    pub fn is_font_size_relative(&self, index: usize) -> bool {
        self.has(index, flags::FONT_SIZE_RELATIVE)
    }

    /// Checks that the value depends on `color`.
    pub fn is_color_relative(&self, index: usize) -> bool {
        self.has(index, flags::COLOR_RELATIVE)
    }

    /// Checks that the value depends on the parent style.
    pub fn is_parent_relative(&self, index: usize) -> bool {
        self.has(index, flags::PARENT_RELATIVE)
    }

    /// Checks that the value depends on the viewport width.
    pub fn is_block_width_relative(&self, index: usize) -> bool {
        self.has(index, flags::BLOCK_WIDTH_RELATIVE)
    }

    /// Checks that the value depends on the viewport height.
    pub fn is_block_height_relative(&self, index: usize) -> bool {
        self.has(index, flags::BLOCK_HEIGHT_RELATIVE)
    }

    /// Returns the origin of the declaration the value came from.
    pub fn origin(&self, index: usize) -> Origin {
        Origin::from_bits((self.mask(index) & flags::ORIGIN_MASK) >> flags::ORIGIN_SHIFT)
    }

    /// Sets a value.
    pub fn put_value(&mut self, index: usize, value: Value) {
        self.values[index] = Some(value);
    }

    /// Replaces all flags of a value.
    pub fn put_mask(&mut self, index: usize, mask: u16) {
        self.masks[index] = mask;
    }

    fn put_flag(&mut self, index: usize, flag: u16, on: bool) {
        if on {
            self.masks[index] |= flag;
        } else {
            self.masks[index] &= !flag;
        }
    }

    /// Sets the important flag.
    pub fn put_important(&mut self, index: usize, on: bool) {
        self.put_flag(index, flags::IMPORTANT, on);
    }

    /// Sets the computed flag.
    pub fn put_computed(&mut self, index: usize, on: bool) {
        self.put_flag(index, flags::COMPUTED, on);
    }

    /// Sets the null-cascaded flag.
    pub fn put_null_cascaded(&mut self, index: usize, on: bool) {
        self.put_flag(index, flags::NULL_CASCADED, on);
    }

    /// Sets the inherited flag.
    pub fn put_inherited(&mut self, index: usize, on: bool) {
        self.put_flag(index, flags::INHERITED, on);
    }

    /// Sets the origin.
    pub fn put_origin(&mut self, index: usize, origin: Origin) {
        let mask = self.masks[index] & !flags::ORIGIN_MASK;
        self.masks[index] = mask | (origin.to_bits() << flags::ORIGIN_SHIFT);
    }

    /// Iterates over set values.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut map = StyleMap::new(2);
        map.put_value(1, Value::Inherit);
        map.put_important(1, true);
        map.put_origin(1, Origin::InlineStyle);
        map.put_computed(1, true);
        assert!(map.is_important(1));
        assert!(map.is_computed(1));
        assert_eq!(map.origin(1), Origin::InlineStyle);

        map.put_origin(1, Origin::Author);
        map.put_important(1, false);
        assert!(!map.is_important(1));
        assert!(map.is_computed(1));
        assert_eq!(map.origin(1), Origin::Author);

        assert_eq!(map.origin(0), Origin::UserAgent);
        assert!(map.value(0).is_none());
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn origin_order() {
        assert!(Origin::UserAgent < Origin::User);
        assert!(Origin::User < Origin::PresentationAttribute);
        assert!(Origin::PresentationAttribute < Origin::Author);
        assert!(Origin::Author < Origin::InlineStyle);
    }
}
