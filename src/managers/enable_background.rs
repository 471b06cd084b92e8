// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;

use super::{
    compute_length_value, create_length, invalid_unit, is_inherit, ComputeContext, Orientation,
    PropertyType, ValueManager,
};
use crate::value::{constants, ListValue, Value};
use crate::Error;

/// The `enable-background` manager: `accumulate | new [<x> <y> <width> <height>]`.
#[derive(Debug)]
pub struct EnableBackgroundManager;

impl ValueManager for EnableBackgroundManager {
    fn property_name(&self) -> &'static str {
        "enable-background"
    }

    fn is_inherited(&self) -> bool {
        false
    }

    fn is_animatable(&self) -> bool {
        false
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::EnableBackground
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::ACCUMULATE)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        let (first, rect) = match units.split_first() {
            Some(v) => v,
            None => return Err(Error::InvalidLexicalUnit(None)),
        };

        if first.is_ident(constants::ACCUMULATE) {
            return match rect.first() {
                Some(lu) => Err(invalid_unit(lu)),
                None => Ok(Value::Ident(constants::ACCUMULATE)),
            };
        }

        match first {
            LexicalUnit::Ident(ref s) if !first.is_ident(constants::NEW) => {
                return Err(Error::InvalidIdentifier(s.clone()))
            }
            LexicalUnit::Ident(_) => {}
            _ => return Err(invalid_unit(first)),
        }

        let mut list = ListValue::new(' ');
        list.append(Value::Ident(constants::NEW));
        match rect.len() {
            0 => {}
            1..=3 => return Err(Error::MalformedLexicalUnit),
            4 => {
                for lu in rect {
                    list.append(Value::Float(create_length(lu)?));
                }
            }
            _ => return Err(invalid_unit(&rect[4])),
        }

        Ok(Value::List(list))
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        let list = match value {
            Value::List(ref list) if list.len() == 5 => list,
            _ => return value.clone(),
        };

        let mut result = ListValue::new(' ');
        for (i, item) in list.items().iter().enumerate() {
            let orientation = if i % 2 == 1 {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };

            result.append(compute_length_value(item, orientation, ctx));
        }

        Value::List(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn parse(text: &str) -> Result<Value, Error> {
        EnableBackgroundManager.create_value(&csslex::parse_property_value(text).unwrap())
    }

    #[test]
    fn parse_enable_background() {
        assert_eq!(parse("accumulate").unwrap().css_text(), "accumulate");
        assert_eq!(parse("NEW").unwrap().css_text(), "new");
        assert_eq!(parse("new 0 0 100 50%").unwrap().css_text(), "new 0 0 100 50%");
        assert!(matches!(parse("new 0 0 100"), Err(Error::MalformedLexicalUnit)));
        assert!(matches!(parse("new 0 0 100 100 1"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(parse("old"), Err(Error::InvalidIdentifier(_))));
        assert!(parse("accumulate 1").is_err());
    }

    #[test]
    fn compute_enable_background() {
        let opt = Options {
            viewport_size: (200.0, 50.0),
            ..Options::default()
        };
        let mut ctx = ComputeContext::new(&opt, None, 0);
        let v = parse("new 50% 50% 50% 50%").unwrap();
        assert_eq!(EnableBackgroundManager.compute_value(&v, &mut ctx).css_text(), "new 100 25 100 25");
    }
}
