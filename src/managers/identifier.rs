// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;
use once_cell::sync::Lazy;

use super::{invalid_unit, is_inherit, single_unit, PropertyType, ValueManager};
use crate::value::{constants, StringMap, Value};
use crate::Error;

struct IdentifierProperty {
    name: &'static str,
    inherited: bool,
    default: &'static str,
    keywords: &'static [&'static str],
}

macro_rules! property {
    ($name:expr, $inherited:expr, $default:expr, [$($kw:expr),+ $(,)?]) => {
        IdentifierProperty {
            name: $name,
            inherited: $inherited,
            default: $default,
            keywords: &[$($kw),+],
        }
    };
}

#[rustfmt::skip]
static PROPERTIES: &[IdentifierProperty] = &[
    property!("alignment-baseline", false, "auto", [
        "auto", "baseline", "before-edge", "text-before-edge", "middle", "after-edge",
        "text-after-edge", "ideographic", "alphabetic", "hanging", "mathematical",
    ]),
    property!("clip-rule", true, "nonzero", ["nonzero", "evenodd"]),
    property!("color-interpolation", true, "sRGB", ["auto", "sRGB", "linearRGB"]),
    property!("color-interpolation-filters", true, "linearRGB", ["auto", "sRGB", "linearRGB"]),
    property!("color-rendering", true, "auto", ["auto", "optimizeSpeed", "optimizeQuality"]),
    property!("direction", true, "ltr", ["ltr", "rtl"]),
    property!("display", false, "inline", [
        "inline", "block", "list-item", "run-in", "compact", "marker", "table", "inline-table",
        "table-row-group", "table-header-group", "table-footer-group", "table-row",
        "table-column-group", "table-column", "table-cell", "table-caption", "none",
    ]),
    property!("dominant-baseline", false, "auto", [
        "auto", "use-script", "no-change", "reset-size", "alphabetic", "hanging", "ideographic",
        "mathematical", "central", "middle", "text-after-edge", "text-before-edge", "text-top",
        "text-bottom",
    ]),
    property!("fill-rule", true, "nonzero", ["nonzero", "evenodd"]),
    property!("font-stretch", true, "normal", [
        "normal", "wider", "narrower", "ultra-condensed", "extra-condensed", "condensed",
        "semi-condensed", "semi-expanded", "expanded", "extra-expanded", "ultra-expanded",
    ]),
    property!("font-style", true, "normal", ["normal", "italic", "oblique"]),
    property!("font-variant", true, "normal", ["normal", "small-caps"]),
    property!("image-rendering", true, "auto", ["auto", "optimizeSpeed", "optimizeQuality"]),
    property!("overflow", false, "visible", ["visible", "hidden", "scroll", "auto"]),
    property!("pointer-events", true, "visiblePainted", [
        "visiblePainted", "visibleFill", "visibleStroke", "visible", "painted", "fill",
        "stroke", "all", "none",
    ]),
    property!("shape-rendering", true, "auto", [
        "auto", "optimizeSpeed", "crispEdges", "geometricPrecision",
    ]),
    property!("stroke-linecap", true, "butt", ["butt", "round", "square"]),
    property!("stroke-linejoin", true, "miter", ["miter", "round", "bevel"]),
    property!("text-anchor", true, "start", ["start", "middle", "end"]),
    property!("text-rendering", true, "auto", [
        "auto", "optimizeSpeed", "optimizeLegibility", "geometricPrecision",
    ]),
    property!("unicode-bidi", false, "normal", ["normal", "embed", "bidi-override"]),
    property!("visibility", true, "visible", ["visible", "hidden", "collapse"]),
    property!("writing-mode", true, "lr-tb", ["lr-tb", "rl-tb", "tb-rl", "lr", "rl", "tb"]),
];

static TABLES: Lazy<Vec<StringMap>> =
    Lazy::new(|| PROPERTIES.iter().map(|p| StringMap::new(p.keywords)).collect());

/// A manager for properties that accept a single keyword.
#[derive(Debug)]
pub struct IdentifierManager {
    name: &'static str,
    inherited: bool,
    default: &'static str,
    values: &'static StringMap,
}

impl IdentifierManager {
    /// Returns managers for all keyword-only properties.
    pub fn all() -> Vec<IdentifierManager> {
        let tables: &'static [StringMap] = &TABLES;
        PROPERTIES
            .iter()
            .zip(tables)
            .map(|(p, values)| IdentifierManager {
                name: p.name,
                inherited: p.inherited,
                default: constants::intern_static(p.default),
                values,
            })
            .collect()
    }

    /// Returns a manager by property name.
    pub fn by_name(name: &str) -> Option<IdentifierManager> {
        IdentifierManager::all().into_iter().find(|m| m.name == name)
    }

    /// Returns the keywords table.
    pub fn values(&self) -> &StringMap {
        self.values
    }
}

impl ValueManager for IdentifierManager {
    fn property_name(&self) -> &'static str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::Ident
    }

    fn default_value(&self) -> Value {
        Value::Ident(self.default)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Ident(ref s) => self
                .values
                .get(s)
                .ok_or_else(|| Error::InvalidIdentifier(s.clone())),
            lu => Err(invalid_unit(lu)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, text: &str) -> Result<Value, Error> {
        let m = IdentifierManager::by_name(name).unwrap();
        m.create_value(&csslex::parse_property_value(text).unwrap())
    }

    #[test]
    fn keyword_case_is_canonical() {
        assert_eq!(create("shape-rendering", "CRISPEDGES").unwrap().css_text(), "crispEdges");
    }

    #[test]
    fn shared_across_properties() {
        let a = create("overflow", "auto").unwrap();
        let b = create("color-rendering", "auto").unwrap();
        assert!(a.is_same_keyword(&b));
        assert!(a.is_same_keyword(&Value::Ident(constants::AUTO)));
    }

    #[test]
    fn unknown_keyword() {
        assert!(matches!(create("fill-rule", "odd"), Err(Error::InvalidIdentifier(_))));
        assert!(matches!(create("fill-rule", "1"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(create("fill-rule", "nonzero evenodd"), Err(Error::InvalidLexicalUnit(_))));
    }
}
