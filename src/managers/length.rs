// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnit;
use once_cell::sync::Lazy;

use super::{
    compute_length, compute_length_value, create_length, create_number, invalid_unit,
    is_inherit, single_unit, ComputeContext, Orientation, PropertyType, ValueManager,
};
use crate::value::{constants, FloatValue, ListValue, PrimitiveType, StringMap, Value};
use crate::Error;

static AUTO_VALUES: Lazy<StringMap> = Lazy::new(|| StringMap::new(&["auto"]));
static NORMAL_VALUES: Lazy<StringMap> = Lazy::new(|| StringMap::new(&["normal"]));
static BASELINE_SHIFT_VALUES: Lazy<StringMap> =
    Lazy::new(|| StringMap::new(&["baseline", "sub", "super"]));

/// A manager for length properties that may also accept keywords.
#[derive(Debug)]
pub struct LengthManager {
    name: &'static str,
    inherited: bool,
    default: Value,
    orientation: Orientation,
    values: Option<&'static StringMap>,
    // Percentages are relative to the font size instead of the viewport.
    font_size_percentages: bool,
}

impl LengthManager {
    fn new(name: &'static str, inherited: bool, default: Value, orientation: Orientation) -> Self {
        LengthManager {
            name,
            inherited,
            default,
            orientation,
            values: None,
            font_size_percentages: false,
        }
    }

    /// `stroke-width`
    pub fn stroke_width() -> Self {
        Self::new(
            "stroke-width",
            true,
            Value::Float(FloatValue::number(1.0)),
            Orientation::Both,
        )
    }

    /// `stroke-dashoffset`
    pub fn stroke_dashoffset() -> Self {
        Self::new(
            "stroke-dashoffset",
            true,
            Value::Float(FloatValue::number(0.0)),
            Orientation::Both,
        )
    }

    /// `kerning`
    pub fn kerning() -> Self {
        LengthManager {
            values: Some(&AUTO_VALUES),
            ..Self::new("kerning", true, Value::Ident(constants::AUTO), Orientation::Horizontal)
        }
    }

    /// `letter-spacing`
    pub fn letter_spacing() -> Self {
        Self::spacing("letter-spacing")
    }

    /// `word-spacing`
    pub fn word_spacing() -> Self {
        Self::spacing("word-spacing")
    }

    fn spacing(name: &'static str) -> Self {
        LengthManager {
            values: Some(&NORMAL_VALUES),
            ..Self::new(name, true, Value::Ident(constants::NORMAL), Orientation::Horizontal)
        }
    }

    /// `baseline-shift`
    pub fn baseline_shift() -> Self {
        LengthManager {
            values: Some(&BASELINE_SHIFT_VALUES),
            font_size_percentages: true,
            ..Self::new(
                "baseline-shift",
                false,
                Value::Ident(constants::BASELINE),
                Orientation::Vertical,
            )
        }
    }
}

impl ValueManager for LengthManager {
    fn property_name(&self) -> &'static str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        if self.values.is_some() {
            PropertyType::LengthOrIdent
        } else {
            PropertyType::Length
        }
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match (single_unit(units)?, self.values) {
            (LexicalUnit::Ident(ref s), Some(values)) => values
                .get(s)
                .ok_or_else(|| Error::InvalidIdentifier(s.clone())),
            (lu, _) => create_length(lu).map(Value::Float),
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        match *value {
            Value::Float(v) if self.font_size_percentages && v.unit == PrimitiveType::Percentage => {
                ctx.set_font_size_relative();
                Value::Float(FloatValue::number(ctx.font_size() * v.value / 100.0))
            }
            _ => compute_length_value(value, self.orientation, ctx),
        }
    }
}

/// A manager for unitless number properties.
#[derive(Debug)]
pub struct NumberManager {
    name: &'static str,
    inherited: bool,
    default: f32,
    min: Option<f32>,
}

impl NumberManager {
    /// `opacity`
    pub fn opacity() -> Self {
        Self::opacity_like("opacity", false)
    }

    /// `fill-opacity`
    pub fn fill_opacity() -> Self {
        Self::opacity_like("fill-opacity", true)
    }

    /// `stroke-opacity`
    pub fn stroke_opacity() -> Self {
        Self::opacity_like("stroke-opacity", true)
    }

    /// `flood-opacity`
    pub fn flood_opacity() -> Self {
        Self::opacity_like("flood-opacity", false)
    }

    /// `stop-opacity`
    pub fn stop_opacity() -> Self {
        Self::opacity_like("stop-opacity", false)
    }

    fn opacity_like(name: &'static str, inherited: bool) -> Self {
        NumberManager {
            name,
            inherited,
            default: 1.0,
            min: None,
        }
    }

    /// `stroke-miterlimit`
    pub fn stroke_miterlimit() -> Self {
        NumberManager {
            name: "stroke-miterlimit",
            inherited: true,
            default: 4.0,
            min: Some(1.0),
        }
    }
}

impl ValueManager for NumberManager {
    fn property_name(&self) -> &'static str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::Number
    }

    fn default_value(&self) -> Value {
        Value::Float(FloatValue::number(self.default))
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        let lu = single_unit(units)?;
        let v = create_number(lu)?;
        if let Some(min) = self.min {
            if v.value < min {
                return Err(invalid_unit(lu));
            }
        }

        Ok(Value::Float(v))
    }
}

/// The `stroke-dasharray` manager.
#[derive(Debug)]
pub struct StrokeDasharrayManager;

impl ValueManager for StrokeDasharrayManager {
    fn property_name(&self) -> &'static str {
        "stroke-dasharray"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::LengthList
    }

    fn default_value(&self) -> Value {
        Value::Ident(constants::NONE)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        if let [LexicalUnit::Ident(ref s)] = units {
            if s.eq_ignore_ascii_case(constants::NONE) {
                return Ok(Value::Ident(constants::NONE));
            }

            return Err(Error::InvalidIdentifier(s.clone()));
        }

        if units.is_empty() {
            return Err(Error::InvalidLexicalUnit(None));
        }

        // Lengths are separated by commas or spaces.
        let mut list = ListValue::new(',');
        let mut iter = units.iter().peekable();
        while let Some(lu) = iter.next() {
            list.append(Value::Float(create_length(lu)?));

            if let Some(LexicalUnit::OperatorComma) = iter.peek() {
                iter.next();
                if iter.peek().is_none() {
                    return Err(Error::MalformedLexicalUnit);
                }
            }
        }

        Ok(Value::List(list))
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        match value {
            Value::List(ref list) => {
                let mut result = ListValue::new(list.separator());
                for item in list.items() {
                    match *item {
                        Value::Float(v) => {
                            result.append(Value::Float(compute_length(v, Orientation::Both, ctx)))
                        }
                        _ => result.append(item.clone()),
                    }
                }
                Value::List(result)
            }
            _ => value.clone(),
        }
    }
}
