// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;
use once_cell::sync::Lazy;

use super::{invalid_unit, is_inherit, single_unit, ComputeContext, PropertyType, ValueManager};
use crate::value::{constants, FloatValue, ListValue, PrimitiveType, StringMap, Value};
use crate::Error;

static DECORATIONS: Lazy<StringMap> =
    Lazy::new(|| StringMap::new(&["underline", "overline", "line-through", "blink"]));

/// The `text-decoration` manager: `none | [underline || overline || line-through || blink]`.
#[derive(Debug)]
pub struct TextDecorationManager;

impl ValueManager for TextDecorationManager {
    fn property_name(&self) -> &'static str {
        "text-decoration"
    }

    fn is_inherited(&self) -> bool {
        false
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::IdentList
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::NONE)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        if let [lu] = units {
            if lu.is_ident(constants::NONE) {
                return Ok(Value::Ident(constants::NONE));
            }
        }

        if units.is_empty() {
            return Err(Error::InvalidLexicalUnit(None));
        }

        let mut list = ListValue::new(' ');
        for lu in units {
            match *lu {
                LexicalUnit::Ident(ref s) => {
                    let v = DECORATIONS
                        .get(s)
                        .ok_or_else(|| Error::InvalidIdentifier(s.clone()))?;
                    list.append(v);
                }
                _ => return Err(invalid_unit(lu)),
            }
        }

        Ok(Value::List(list))
    }
}

/// The `glyph-orientation-horizontal` and `glyph-orientation-vertical` manager.
///
/// Unitless numbers are degrees. Computed angles are always in degrees.
#[derive(Debug)]
pub struct GlyphOrientationManager {
    vertical: bool,
}

impl GlyphOrientationManager {
    /// `glyph-orientation-horizontal`
    pub fn horizontal() -> Self {
        GlyphOrientationManager { vertical: false }
    }

    /// `glyph-orientation-vertical`
    pub fn vertical() -> Self {
        GlyphOrientationManager { vertical: true }
    }
}

impl ValueManager for GlyphOrientationManager {
    fn property_name(&self) -> &'static str {
        if self.vertical {
            "glyph-orientation-vertical"
        } else {
            "glyph-orientation-horizontal"
        }
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        if self.vertical {
            PropertyType::AngleOrIdent
        } else {
            PropertyType::Angle
        }
    }

    fn default_value(&self) -> Value {
        if self.vertical {
            Value::Ident(constants::AUTO)
        } else {
            Value::Float(FloatValue::new(PrimitiveType::Deg, 0.0))
        }
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        let lu = single_unit(units)?;
        match *lu {
            LexicalUnit::Ident(_) if self.vertical && lu.is_ident(constants::AUTO) => {
                Ok(Value::Ident(constants::AUTO))
            }
            LexicalUnit::Ident(ref s) => Err(Error::InvalidIdentifier(s.clone())),
            LexicalUnit::Integer(n) => Ok(Value::Float(FloatValue::new(PrimitiveType::Deg, n as f32))),
            LexicalUnit::Real(n) => Ok(Value::Float(FloatValue::new(PrimitiveType::Deg, n))),
            _ => match FloatValue::from_lexical_unit(lu) {
                Some(v) if v.unit.is_angle() => Ok(Value::Float(v)),
                _ => Err(invalid_unit(lu)),
            },
        }
    }

    fn compute_value(&self, value: &Value, _: &mut ComputeContext) -> Value {
        match *value {
            Value::Float(v) => {
                let deg = match v.unit {
                    PrimitiveType::Rad => v.value.to_degrees(),
                    PrimitiveType::Grad => v.value * 9.0 / 10.0,
                    _ => v.value,
                };
                Value::Float(FloatValue::new(PrimitiveType::Deg, deg))
            }
            _ => value.clone(),
        }
    }
}
