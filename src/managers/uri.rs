// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;

use super::{invalid_unit, is_inherit, single_unit, PropertyType, ValueManager};
use crate::value::{constants, Value};
use crate::Error;

/// A manager for `none | <uri>` properties.
#[derive(Debug)]
pub struct UriManager {
    name: &'static str,
    inherited: bool,
}

impl UriManager {
    /// Creates a manager for a `none | <uri>` property.
    pub fn new(name: &'static str, inherited: bool) -> Self {
        UriManager { name, inherited }
    }

    /// Returns managers for all `none | <uri>` properties.
    pub fn all() -> Vec<UriManager> {
        vec![
            UriManager::new("clip-path", false),
            UriManager::new("filter", false),
            UriManager::new("marker-end", true),
            UriManager::new("marker-mid", true),
            UriManager::new("marker-start", true),
            UriManager::new("mask", false),
        ]
    }
}

impl ValueManager for UriManager {
    fn property_name(&self) -> &'static str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::UriOrIdent
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::NONE)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Uri(ref uri) => Ok(Value::uri(uri)),
            lu if lu.is_ident(constants::NONE) => Ok(Value::Ident(constants::NONE)),
            LexicalUnit::Ident(ref s) => Err(Error::InvalidIdentifier(s.clone())),
            lu => Err(invalid_unit(lu)),
        }
    }
}

/// The `color-profile` manager.
///
/// A profile name that is not a keyword is stored as a string.
#[derive(Debug)]
pub struct ColorProfileManager;

impl ValueManager for ColorProfileManager {
    fn property_name(&self) -> &'static str {
        "color-profile"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn is_animatable(&self) -> bool {
        false
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::ColorProfile
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::AUTO)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match single_unit(units)? {
            LexicalUnit::Uri(ref uri) => Ok(Value::uri(uri)),
            lu if lu.is_ident(constants::AUTO) => Ok(Value::Ident(constants::AUTO)),
            lu if lu.is_ident(constants::SRGB) => Ok(Value::Ident(constants::SRGB)),
            LexicalUnit::Ident(ref s) => Ok(Value::String(s.clone())),
            lu => Err(invalid_unit(lu)),
        }
    }
}
