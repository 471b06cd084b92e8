// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;

use super::{
    compute_length_value, create_length, invalid_unit, is_inherit, single_unit, ComputeContext,
    Orientation, PropertyType, ValueManager,
};
use crate::value::{constants, RectValue, Value};
use crate::Error;

/// The `clip` manager: `auto | rect(top, right, bottom, left)`.
#[derive(Debug)]
pub struct ClipManager;

fn create_side(lu: &LexicalUnit) -> Result<Value, Error> {
    if lu.is_ident(constants::AUTO) {
        return Ok(Value::Ident(constants::AUTO));
    }

    create_length(lu).map(Value::Float)
}

impl ValueManager for ClipManager {
    fn property_name(&self) -> &'static str {
        "clip"
    }

    fn is_inherited(&self) -> bool {
        false
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::Rect
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::AUTO)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        let params = match single_unit(units)? {
            lu if lu.is_ident(constants::AUTO) => return Ok(Value::Ident(constants::AUTO)),
            LexicalUnit::Ident(ref s) => return Err(Error::InvalidIdentifier(s.clone())),
            LexicalUnit::RectFunction(ref params) => params,
            lu => return Err(invalid_unit(lu)),
        };

        // Exactly four sides separated by commas.
        let mut sides = Vec::with_capacity(4);
        for (i, lu) in params.iter().enumerate() {
            let is_comma = matches!(lu, LexicalUnit::OperatorComma);
            if (i % 2 == 1) != is_comma {
                return Err(Error::MalformedLexicalUnit);
            }

            if !is_comma {
                sides.push(create_side(lu)?);
            }
        }

        if params.len() != 7 {
            return Err(Error::MalformedLexicalUnit);
        }

        let mut sides = sides.into_iter();
        match (sides.next(), sides.next(), sides.next(), sides.next()) {
            (Some(top), Some(right), Some(bottom), Some(left)) => {
                Ok(Value::Rect(Box::new(RectValue {
                    top,
                    right,
                    bottom,
                    left,
                })))
            }
            _ => Err(Error::MalformedLexicalUnit),
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        match value {
            Value::Rect(ref rect) => Value::Rect(Box::new(RectValue {
                top: compute_length_value(&rect.top, Orientation::Vertical, ctx),
                right: compute_length_value(&rect.right, Orientation::Horizontal, ctx),
                bottom: compute_length_value(&rect.bottom, Orientation::Vertical, ctx),
                left: compute_length_value(&rect.left, Orientation::Horizontal, ctx),
            })),
            _ => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn parse(text: &str) -> Result<Value, Error> {
        ClipManager.create_value(&csslex::parse_property_value(text).unwrap())
    }

    #[test]
    fn parse_rect() {
        assert_eq!(parse("auto").unwrap().css_text(), "auto");
        assert_eq!(parse("rect(1px, AUTO, 3mm, 4)").unwrap().css_text(), "rect(1px, auto, 3mm, 4)");
        assert!(matches!(parse("rect(1px 2px 3px 4px)"), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse("rect(1px, 2px, 3px)"), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse("rect(1px, 2px, 3px, 4px,)"), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse("rect(1px, 2deg, 3px, 4px)"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(parse("none"), Err(Error::InvalidIdentifier(_))));
    }

    #[test]
    fn compute_rect() {
        let opt = Options {
            viewport_size: (200.0, 50.0),
            ..Options::default()
        };
        let mut ctx = ComputeContext::new(&opt, None, 0);
        let v = parse("rect(10%, 10%, 1in, auto)").unwrap();
        assert_eq!(ClipManager.compute_value(&v, &mut ctx).css_text(), "rect(5, 20, 96, auto)");
    }
}
