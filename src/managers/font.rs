// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;
use once_cell::sync::Lazy;

use super::{
    compute_length, create_length, create_number, invalid_unit, is_inherit, single_unit,
    ComputeContext, Orientation, PropertyType, ValueManager,
};
use crate::value::{constants, FloatValue, ListValue, PrimitiveType, StringMap, Value};
use crate::Error;

static GENERIC_FAMILIES: Lazy<StringMap> = Lazy::new(|| {
    StringMap::new(&["serif", "sans-serif", "cursive", "fantasy", "monospace"])
});

static FONT_SIZES: Lazy<StringMap> = Lazy::new(|| {
    StringMap::new(&[
        "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller",
        "larger",
    ])
});

static FONT_WEIGHTS: Lazy<StringMap> =
    Lazy::new(|| StringMap::new(&["normal", "bold", "bolder", "lighter"]));

const SCALE: f32 = 1.2;

/// The `font-family` manager.
///
/// Produces a comma separated list where each item is either
/// a font name string or a shared generic family keyword.
#[derive(Debug)]
pub struct FontFamilyManager;

impl FontFamilyManager {
    /// Returns the generic family keywords table.
    pub fn generic_families() -> &'static StringMap {
        &GENERIC_FAMILIES
    }
}

impl ValueManager for FontFamilyManager {
    fn property_name(&self) -> &'static str {
        "font-family"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::FontFamily
    }

    fn default_value(&self) -> Value {
        constants::DEFAULT_FONT_FAMILY.clone()
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        if units.is_empty() {
            return Err(Error::InvalidLexicalUnit(None));
        }

        let mut list = ListValue::new(',');
        let mut idx = 0;
        loop {
            match units.get(idx) {
                Some(LexicalUnit::String(ref s)) => {
                    list.append(Value::String(s.clone()));
                    idx += 1;
                }
                Some(LexicalUnit::Ident(ref s)) => {
                    idx += 1;

                    // Unquoted names may span several identifiers and integers.
                    let mut name = s.clone();
                    let mut is_compound = false;
                    while let Some(lu) = units.get(idx) {
                        let part = match *lu {
                            LexicalUnit::Ident(ref s) => s.clone(),
                            LexicalUnit::Integer(n) => n.to_string(),
                            _ => break,
                        };

                        name.push(' ');
                        name.push_str(&part);
                        is_compound = true;
                        idx += 1;
                    }

                    let value = if is_compound {
                        Value::String(name)
                    } else {
                        GENERIC_FAMILIES.get(&name).unwrap_or(Value::String(name))
                    };
                    list.append(value);
                }
                Some(lu) => return Err(invalid_unit(lu)),
                None => return Err(Error::MalformedLexicalUnit),
            }

            match units.get(idx) {
                None => break,
                Some(LexicalUnit::OperatorComma) => {
                    idx += 1;
                    if idx == units.len() {
                        return Err(Error::MalformedLexicalUnit);
                    }
                }
                Some(_) => return Err(Error::MalformedLexicalUnit),
            }
        }

        Ok(Value::List(list))
    }

    fn compute_default_value(&self, ctx: &mut ComputeContext) -> Value {
        let text = &ctx.options().font_family;
        let parsed = csslex::parse_property_value(text)
            .map_err(Error::from)
            .and_then(|units| self.create_value(&units));
        match parsed {
            Ok(Value::List(list)) => Value::List(list),
            Ok(_) | Err(_) => {
                log::warn!("Invalid default font family: '{}'.", text);
                self.default_value()
            }
        }
    }
}

/// The `font-size` manager.
#[derive(Debug)]
pub struct FontSizeManager;

impl ValueManager for FontSizeManager {
    fn property_name(&self) -> &'static str {
        "font-size"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::FontSize
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::MEDIUM)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Ident(ref s) => FONT_SIZES
                .get(s)
                .ok_or_else(|| Error::InvalidIdentifier(s.clone())),
            lu => {
                let v = create_length(lu)?;
                if v.value < 0.0 {
                    return Err(invalid_unit(lu));
                }

                Ok(Value::Float(v))
            }
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        let size = match *value {
            Value::Float(v) => match v.unit {
                PrimitiveType::Em => {
                    ctx.set_parent_relative();
                    v.value * ctx.parent_font_size()
                }
                PrimitiveType::Ex => {
                    ctx.set_parent_relative();
                    v.value * ctx.parent_font_size() * 0.5
                }
                PrimitiveType::Percentage => {
                    ctx.set_parent_relative();
                    v.value * ctx.parent_font_size() / 100.0
                }
                _ => compute_length(v, Orientation::Vertical, ctx).value,
            },
            Value::Ident(s) => {
                let medium = ctx.options().font_size;
                if s == constants::LARGER {
                    ctx.set_parent_relative();
                    ctx.parent_font_size() * SCALE
                } else if s == constants::SMALLER {
                    ctx.set_parent_relative();
                    ctx.parent_font_size() / SCALE
                } else if s == constants::XX_SMALL {
                    medium / (SCALE * SCALE * SCALE)
                } else if s == constants::X_SMALL {
                    medium / (SCALE * SCALE)
                } else if s == constants::SMALL {
                    medium / SCALE
                } else if s == constants::LARGE {
                    medium * SCALE
                } else if s == constants::X_LARGE {
                    medium * SCALE * SCALE
                } else if s == constants::XX_LARGE {
                    medium * SCALE * SCALE * SCALE
                } else {
                    medium
                }
            }
            _ => return value.clone(),
        };

        Value::Float(FloatValue::number(size))
    }
}

/// The `font-weight` manager.
///
/// Numeric weights are stored as numbers, `normal` and `bold` stay keywords.
/// `bolder` and `lighter` compute to a number relative to the parent weight.
#[derive(Debug)]
pub struct FontWeightManager {
    index: usize,
}

impl FontWeightManager {
    /// Creates a manager registered at `index`.
    ///
    /// The index is used to look up the parent weight.
    pub fn new(index: usize) -> Self {
        FontWeightManager { index }
    }

    fn parent_weight(&self, ctx: &ComputeContext) -> f32 {
        match ctx.parent_value(self.index) {
            Some(Value::Float(v)) => v.value,
            Some(Value::Ident(s)) if *s == constants::BOLD => 700.0,
            _ => 400.0,
        }
    }
}

fn bolder_weight(weight: f32) -> f32 {
    match round_weight(weight) {
        0..=500 => 600.0,
        600 => 700.0,
        700 => 800.0,
        _ => 900.0,
    }
}

fn lighter_weight(weight: f32) -> f32 {
    match round_weight(weight) {
        0..=200 => 100.0,
        300 => 200.0,
        400 => 300.0,
        _ => 400.0,
    }
}

fn round_weight(weight: f32) -> u32 {
    ((weight.max(0.0) + 50.0) / 100.0) as u32 * 100
}

impl ValueManager for FontWeightManager {
    fn property_name(&self) -> &'static str {
        "font-weight"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::FontWeight
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::NORMAL)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Ident(ref s) => FONT_WEIGHTS
                .get(s)
                .ok_or_else(|| Error::InvalidIdentifier(s.clone())),
            LexicalUnit::Integer(n) if (100..=900).contains(n) && n % 100 == 0 => {
                Ok(Value::Float(FloatValue::number(*n as f32)))
            }
            lu => Err(invalid_unit(lu)),
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        match *value {
            Value::Ident(s) if s == constants::BOLDER => {
                ctx.set_parent_relative();
                let weight = bolder_weight(self.parent_weight(ctx));
                Value::Float(FloatValue::number(weight))
            }
            Value::Ident(s) if s == constants::LIGHTER => {
                ctx.set_parent_relative();
                let weight = lighter_weight(self.parent_weight(ctx));
                Value::Float(FloatValue::number(weight))
            }
            _ => value.clone(),
        }
    }
}

/// The `font-size-adjust` manager.
#[derive(Debug)]
pub struct FontSizeAdjustManager;

impl ValueManager for FontSizeAdjustManager {
    fn property_name(&self) -> &'static str {
        "font-size-adjust"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::NumberOrIdent
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::NONE)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Ident(ref s) if s.eq_ignore_ascii_case(constants::NONE) => {
                Ok(Value::Ident(constants::NONE))
            }
            LexicalUnit::Ident(ref s) => Err(Error::InvalidIdentifier(s.clone())),
            lu => create_number(lu).map(Value::Float),
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map::StyleMap;
    use crate::Options;

    fn parse(m: &dyn ValueManager, text: &str) -> Result<Value, Error> {
        m.create_value(&csslex::parse_property_value(text).unwrap())
    }

    macro_rules! family {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse(&FontFamilyManager, $text).unwrap().css_text(), $result);
            }
        )
    }

    family!(family_1, "serif", "serif");
    family!(family_2, "Arial, \"Times New Roman\", serif", "\"Arial\", \"Times New Roman\", serif");
    family!(family_3, "Univers 45 Light", "\"Univers 45 Light\"");
    family!(family_4, "MONOSPACE", "monospace");
    family!(family_5, "Serif Pro, cursive", "\"Serif Pro\", cursive");
    family!(family_6, "'Font', Fantasy", "\"Font\", fantasy");

    #[test]
    fn family_generic_is_shared() {
        let v = parse(&FontFamilyManager, "SANS-SERIF").unwrap();
        let item = v.as_list().unwrap().item(0).unwrap();
        assert!(item.is_same_keyword(&Value::Ident(constants::SANS_SERIF)));
    }

    #[test]
    fn family_errors() {
        assert!(matches!(parse(&FontFamilyManager, "Arial,"), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse(&FontFamilyManager, "Arial,,serif"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(parse(&FontFamilyManager, "\"A\" \"B\""), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse(&FontFamilyManager, "12"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(parse(&FontFamilyManager, "inherit"), Ok(Value::Inherit)));
    }

    #[test]
    fn family_default_is_replaced() {
        let opt = Options {
            font_family: "Verdana, serif".to_string(),
            ..Options::default()
        };
        let mut ctx = ComputeContext::new(&opt, None, 0);
        let v = FontFamilyManager.compute_default_value(&mut ctx);
        assert_eq!(v.css_text(), "\"Verdana\", serif");

        let v = parse(&FontFamilyManager, "Arial, sans-serif").unwrap();
        assert_eq!(FontFamilyManager.compute_value(&v, &mut ctx), v);

        // A specified value equal to the initial one stays as is.
        let v = parse(&FontFamilyManager, "Arial, Helvetica, sans-serif").unwrap();
        assert_eq!(v, FontFamilyManager.default_value());
        assert_eq!(FontFamilyManager.compute_value(&v, &mut ctx), v);
    }

    #[test]
    fn size_keywords() {
        let opt = Options::default();
        let mut ctx = ComputeContext::new(&opt, None, 0);
        let v = parse(&FontSizeManager, "LARGE").unwrap();
        assert_eq!(v.css_text(), "large");
        let v = FontSizeManager.compute_value(&v, &mut ctx);
        assert!((v.as_float().unwrap() - 14.4).abs() < 0.001);
        assert_eq!(ctx.take_flags(), 0);

        let v = FontSizeManager.compute_value(&Value::Ident(constants::XX_SMALL), &mut ctx);
        assert!((v.as_float().unwrap() - 12.0 / 1.728).abs() < 0.001);
    }

    #[test]
    fn size_relative_to_parent() {
        let opt = Options::default();
        let mut parent = StyleMap::new(1);
        parent.put_value(0, Value::Float(FloatValue::number(20.0)));
        let mut ctx = ComputeContext::new(&opt, Some(&parent), 0);

        let v = FontSizeManager.compute_value(&parse(&FontSizeManager, "150%").unwrap(), &mut ctx);
        assert_eq!(v, Value::Float(FloatValue::number(30.0)));
        assert_eq!(ctx.take_flags(), crate::style_map::flags::PARENT_RELATIVE);

        let v = FontSizeManager.compute_value(&parse(&FontSizeManager, "2em").unwrap(), &mut ctx);
        assert_eq!(v, Value::Float(FloatValue::number(40.0)));

        let v = FontSizeManager.compute_value(&Value::Ident(constants::LARGER), &mut ctx);
        assert!((v.as_float().unwrap() - 24.0).abs() < 0.001);

        assert!(parse(&FontSizeManager, "-1px").is_err());
        assert!(parse(&FontSizeManager, "huge").is_err());
    }

    #[test]
    fn weight() {
        let m = FontWeightManager::new(0);
        assert_eq!(parse(&m, "700").unwrap().css_text(), "700");
        assert_eq!(parse(&m, "Bold").unwrap().css_text(), "bold");
        assert!(parse(&m, "750").is_err());
        assert!(parse(&m, "1000").is_err());

        let opt = Options::default();
        let mut parent = StyleMap::new(1);
        parent.put_value(0, Value::Ident(constants::BOLD));
        let mut ctx = ComputeContext::new(&opt, Some(&parent), 0);
        let v = m.compute_value(&Value::Ident(constants::BOLDER), &mut ctx);
        assert_eq!(v.css_text(), "800");
        let v = m.compute_value(&Value::Ident(constants::LIGHTER), &mut ctx);
        assert_eq!(v.css_text(), "400");

        let mut ctx = ComputeContext::new(&opt, None, 0);
        let v = m.compute_value(&Value::Ident(constants::BOLDER), &mut ctx);
        assert_eq!(v.css_text(), "600");
    }

    #[test]
    fn size_adjust() {
        assert_eq!(parse(&FontSizeAdjustManager, "none").unwrap().css_text(), "none");
        assert_eq!(parse(&FontSizeAdjustManager, "0.5").unwrap().css_text(), "0.5");
        assert!(parse(&FontSizeAdjustManager, "auto").is_err());
    }
}
