// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;
use once_cell::sync::Lazy;

use super::{invalid_unit, is_inherit, PropertyType, ValueManager};
use crate::value::{constants, ListValue, StringMap, Value};
use crate::Error;

static CURSORS: Lazy<StringMap> = Lazy::new(|| {
    StringMap::new(&[
        "auto", "crosshair", "default", "pointer", "move", "e-resize", "ne-resize", "nw-resize",
        "n-resize", "se-resize", "sw-resize", "s-resize", "w-resize", "text", "wait", "help",
    ])
});

/// The `cursor` manager: `[<uri> ,]* <keyword>`.
///
/// Always produces a comma separated list ending with a keyword.
#[derive(Debug)]
pub struct CursorManager;

impl ValueManager for CursorManager {
    fn property_name(&self) -> &'static str {
        "cursor"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::Cursor
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::AUTO)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        let mut list = ListValue::new(',');
        let mut iter = units.iter();
        loop {
            match iter.next() {
                Some(LexicalUnit::Uri(ref uri)) => {
                    list.append(Value::uri(uri));
                    match iter.next() {
                        Some(LexicalUnit::OperatorComma) => {}
                        Some(lu) => return Err(invalid_unit(lu)),
                        None => return Err(Error::MalformedLexicalUnit),
                    }
                }
                Some(LexicalUnit::Ident(ref s)) => {
                    let v = CURSORS
                        .get(s)
                        .ok_or_else(|| Error::InvalidIdentifier(s.clone()))?;
                    list.append(v);
                    break;
                }
                Some(lu) => return Err(invalid_unit(lu)),
                None => return Err(Error::MalformedLexicalUnit),
            }
        }

        if let Some(lu) = iter.next() {
            return Err(invalid_unit(lu));
        }

        Ok(Value::List(list))
    }
}
