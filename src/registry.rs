// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use crate::managers::*;
use crate::{Error, Value};

/// The `font-size` property index. Always computed first.
pub const FONT_SIZE_INDEX: usize = 0;

/// The `color` property index. Computed right after `font-size`.
pub const COLOR_INDEX: usize = 1;

const FONT_WEIGHT_INDEX: usize = 2;

fn svg_managers() -> Vec<Box<dyn ValueManager>> {
    let mut list: Vec<Box<dyn ValueManager>> = vec![
        Box::new(FontSizeManager),
        Box::new(ColorManager::color()),
        Box::new(FontWeightManager::new(FONT_WEIGHT_INDEX)),
        Box::new(FontFamilyManager),
        Box::new(FontSizeAdjustManager),
        Box::new(PaintManager::fill()),
        Box::new(PaintManager::stroke()),
        Box::new(ColorManager::flood_color()),
        Box::new(ColorManager::lighting_color()),
        Box::new(ColorManager::stop_color()),
        Box::new(LengthManager::stroke_width()),
        Box::new(LengthManager::stroke_dashoffset()),
        Box::new(LengthManager::kerning()),
        Box::new(LengthManager::letter_spacing()),
        Box::new(LengthManager::word_spacing()),
        Box::new(LengthManager::baseline_shift()),
        Box::new(NumberManager::opacity()),
        Box::new(NumberManager::fill_opacity()),
        Box::new(NumberManager::stroke_opacity()),
        Box::new(NumberManager::flood_opacity()),
        Box::new(NumberManager::stop_opacity()),
        Box::new(NumberManager::stroke_miterlimit()),
        Box::new(StrokeDasharrayManager),
        Box::new(ClipManager),
        Box::new(CursorManager),
        Box::new(EnableBackgroundManager),
        Box::new(TextDecorationManager),
        Box::new(GlyphOrientationManager::horizontal()),
        Box::new(GlyphOrientationManager::vertical()),
        Box::new(ColorProfileManager),
    ];

    for m in UriManager::all() {
        list.push(Box::new(m));
    }

    for m in IdentifierManager::all() {
        list.push(Box::new(m));
    }

    list
}

/// A property name to value manager map.
///
/// Each manager has a stable index, which is also its index in a [`StyleMap`](crate::StyleMap).
pub struct Registry {
    managers: Vec<Box<dyn ValueManager>>,
    indices: HashMap<&'static str, usize>,
}

impl Registry {
    /// Creates a registry with all SVG 1.1 properties.
    pub fn new() -> Self {
        let mut registry = Registry {
            managers: Vec::new(),
            indices: HashMap::new(),
        };

        for manager in svg_managers() {
            if let Err(e) = registry.register(manager) {
                log::error!("{}.", e);
            }
        }

        registry
    }

    /// Adds a manager and returns its index.
    ///
    /// # Errors
    ///
    /// `DuplicatedProperty` when the property name is already registered.
    pub fn register(&mut self, manager: Box<dyn ValueManager>) -> Result<usize, Error> {
        let name = manager.property_name();
        if self.indices.contains_key(name) {
            return Err(Error::DuplicatedProperty(name.to_string()));
        }

        let idx = self.managers.len();
        self.indices.insert(name, idx);
        self.managers.push(manager);
        Ok(idx)
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Checks that the registry has no properties.
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Returns the property index.
    ///
    /// Names are matched ignoring ASCII case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        match self.indices.get(name) {
            Some(idx) => Some(*idx),
            None => self.indices.get(name.to_ascii_lowercase().as_str()).copied(),
        }
    }

    /// Returns a manager by index.
    pub fn manager(&self, index: usize) -> Option<&dyn ValueManager> {
        self.managers.get(index).map(|m| m.as_ref())
    }

    /// Returns a manager by property name.
    pub fn manager_by_name(&self, name: &str) -> Option<&dyn ValueManager> {
        self.index_of(name).and_then(|idx| self.manager(idx))
    }

    /// Returns the property name.
    pub fn property_name(&self, index: usize) -> Option<&'static str> {
        self.manager(index).map(|m| m.property_name())
    }

    /// Iterates over managers in index order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ValueManager> + '_ {
        self.managers.iter().map(|m| m.as_ref())
    }

    /// Parses a property value.
    ///
    /// # Errors
    ///
    /// - `UnknownProperty`
    /// - `Syntax` when the value can't be tokenized
    /// - any error of the property manager
    pub fn parse_value(&self, name: &str, text: &str) -> Result<(usize, Value), Error> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| Error::UnknownProperty(name.to_string()))?;
        let units = csslex::parse_property_value(text)?;
        let value = self.managers[idx].create_value(&units)?;
        Ok((idx, value))
    }

    /// Parses a declaration, expanding shorthands.
    ///
    /// `marker` sets `marker-start`, `marker-mid` and `marker-end`.
    pub fn parse_declaration(&self, name: &str, text: &str) -> Result<Vec<(usize, Value)>, Error> {
        if name.eq_ignore_ascii_case("marker") {
            let mut list = Vec::with_capacity(3);
            for name in &["marker-start", "marker-mid", "marker-end"] {
                list.push(self.parse_value(name, text)?);
            }

            return Ok(list);
        }

        Ok(vec![self.parse_value(name, text)?])
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|m| m.property_name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_indices() {
        let reg = Registry::new();
        assert_eq!(reg.index_of("font-size"), Some(FONT_SIZE_INDEX));
        assert_eq!(reg.index_of("color"), Some(COLOR_INDEX));
        assert_eq!(reg.index_of("font-weight"), Some(FONT_WEIGHT_INDEX));
        assert_eq!(reg.index_of("FILL"), reg.index_of("fill"));
        assert!(reg.index_of("marker").is_none());
    }

    #[test]
    fn names_are_unique() {
        let reg = Registry::new();
        let mut names: Vec<_> = reg.iter().map(|m| m.property_name()).collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len);
        assert_eq!(reg.len(), 59);
    }

    #[test]
    fn duplicate_registration() {
        let mut reg = Registry::new();
        let len = reg.len();
        assert!(matches!(reg.register(Box::new(ClipManager)), Err(Error::DuplicatedProperty(_))));
        assert_eq!(reg.len(), len);
    }

    #[test]
    fn marker_shorthand() {
        let reg = Registry::new();
        let list = reg.parse_declaration("marker", "url(#m)").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(reg.property_name(list[0].0), Some("marker-start"));
        assert_eq!(reg.property_name(list[2].0), Some("marker-end"));
        assert_eq!(list[1].1.css_text(), "url(#m)");
    }

    #[test]
    fn unknown_property() {
        let reg = Registry::new();
        assert!(matches!(reg.parse_value("foo", "1"), Err(Error::UnknownProperty(_))));
        assert!(matches!(reg.parse_value("fill", "#"), Err(Error::Syntax(_))));
    }
}
