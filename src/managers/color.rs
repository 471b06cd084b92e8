// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use csslex::{LexicalUnit, LexicalUnitType, Unit};

use super::{invalid_unit, is_inherit, ComputeContext, PropertyType, ValueManager};
use crate::value::{
    constants, CieColor, CieKind, DeviceColor, FloatValue, IccColor, IccNamedColor, ListValue,
    PrimitiveType, RgbColor, Value,
};
use crate::Error;

/// A manager for color properties.
///
/// `color` accepts only plain colors. SVG color properties also accept
/// `currentColor` and a color followed by an ICC, CIE or device color function.
#[derive(Debug)]
pub struct ColorManager {
    name: &'static str,
    inherited: bool,
    default: RgbColor,
    svg: bool,
}

impl ColorManager {
    /// `color`
    pub fn color() -> Self {
        ColorManager {
            name: "color",
            inherited: true,
            default: constants::BLACK_RGB,
            svg: false,
        }
    }

    /// `flood-color`
    pub fn flood_color() -> Self {
        Self::svg_color("flood-color", constants::BLACK_RGB)
    }

    /// `lighting-color`
    pub fn lighting_color() -> Self {
        Self::svg_color("lighting-color", constants::WHITE_RGB)
    }

    /// `stop-color`
    pub fn stop_color() -> Self {
        Self::svg_color("stop-color", constants::BLACK_RGB)
    }

    fn svg_color(name: &'static str, default: RgbColor) -> Self {
        ColorManager {
            name,
            inherited: false,
            default,
            svg: true,
        }
    }
}

impl ValueManager for ColorManager {
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
        PropertyType::Color
    }

    fn default_value(&self) -> Value {
        Value::Rgb(self.default)
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        if self.svg {
            create_svg_color(units)
        } else {
            match units {
                [lu] => create_rgb_color(lu),
                [] => Err(Error::InvalidLexicalUnit(None)),
                [_, next, ..] => Err(invalid_unit(next)),
            }
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        compute_color(value, ctx)
    }
}

/// The `fill` and `stroke` manager.
#[derive(Debug)]
pub struct PaintManager {
    name: &'static str,
    default: Value,
}

impl PaintManager {
    /// `fill`
    pub fn fill() -> Self {
        PaintManager {
            name: "fill",
            default: Value::Rgb(constants::BLACK_RGB),
        }
    }

    /// `stroke`
    pub fn stroke() -> Self {
        PaintManager {
            name: "stroke",
            default: Value::Ident(constants::NONE),
        }
    }
}

impl ValueManager for PaintManager {
    fn property_name(&self) -> &'static str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn is_additive(&self) -> bool {
        true
    }

    fn property_type(&self) -> PropertyType {
        PropertyType::Paint
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn create_value(&self, units: &[LexicalUnit]) -> Result<Value, Error> {
        if is_inherit(units) {
            return Ok(Value::Inherit);
        }

        match units {
            [lu] if lu.is_ident(constants::NONE) => Ok(Value::Ident(constants::NONE)),
            [LexicalUnit::Uri(ref uri)] => Ok(Value::uri(uri)),
            [LexicalUnit::Uri(ref uri), fallback @ ..] => {
                // A fallback paint is flattened into the list.
                let mut list = ListValue::new(' ');
                list.append(Value::uri(uri));
                if let [lu] = fallback {
                    if lu.is_ident(constants::NONE) {
                        list.append(Value::Ident(constants::NONE));
                        return Ok(Value::List(list));
                    }
                }

                match create_svg_color(fallback)? {
                    Value::List(colors) => {
                        for item in colors.items() {
                            list.append(item.clone());
                        }
                    }
                    color => list.append(color),
                }

                Ok(Value::List(list))
            }
            _ => create_svg_color(units),
        }
    }

    fn compute_value(&self, value: &Value, ctx: &mut ComputeContext) -> Value {
        compute_color(value, ctx)
    }
}

/// Parses `currentColor` or a color optionally followed by a color function.
fn create_svg_color(units: &[LexicalUnit]) -> Result<Value, Error> {
    match units {
        [lu] if lu.is_ident(constants::CURRENT_COLOR) => Ok(Value::Ident(constants::CURRENT_COLOR)),
        [lu] => create_rgb_color(lu),
        [lu, func @ LexicalUnit::Function { .. }] => {
            let color = create_rgb_color(lu)?;
            let func = create_color_function(func)?;
            Ok(Value::List(ListValue::from_items(' ', vec![color, func])))
        }
        [] => Err(Error::InvalidLexicalUnit(None)),
        [_, next, ..] => Err(invalid_unit(next)),
    }
}

/// Parses a named color or an `rgb()` color.
pub(crate) fn create_rgb_color(lu: &LexicalUnit) -> Result<Value, Error> {
    match *lu {
        LexicalUnit::Ident(ref name) => {
            let name = name.to_ascii_lowercase();
            match svgtypes::Color::from_str(&name) {
                Ok(c) if c.alpha == 255 => Ok(Value::Rgb(RgbColor::new(
                    c.red as f32,
                    c.green as f32,
                    c.blue as f32,
                ))),
                _ => Err(Error::InvalidIdentifier(name)),
            }
        }
        LexicalUnit::RgbColor(ref params) => {
            let args = split_arguments(params)?;
            if args.len() != 3 {
                return Err(invalid_unit(lu));
            }

            Ok(Value::Rgb(RgbColor {
                red: create_color_component(args[0])?,
                green: create_color_component(args[1])?,
                blue: create_color_component(args[2])?,
            }))
        }
        _ => Err(invalid_unit(lu)),
    }
}

fn create_color_component(lu: &LexicalUnit) -> Result<FloatValue, Error> {
    match *lu {
        LexicalUnit::Integer(n) => Ok(FloatValue::number(n as f32)),
        LexicalUnit::Real(n) => Ok(FloatValue::number(n)),
        LexicalUnit::Dimension(n, Unit::Percent) => {
            Ok(FloatValue::new(PrimitiveType::Percentage, n))
        }
        _ => Err(invalid_unit(lu)),
    }
}

fn create_channel(lu: &LexicalUnit) -> Result<f32, Error> {
    match *lu {
        LexicalUnit::Integer(n) => Ok(n as f32),
        LexicalUnit::Real(n) => Ok(n),
        _ => Err(invalid_unit(lu)),
    }
}

/// Splits function parameters by commas.
fn split_arguments(params: &[LexicalUnit]) -> Result<Vec<&LexicalUnit>, Error> {
    let mut args = Vec::with_capacity(params.len() / 2 + 1);
    let mut iter = params.iter();
    while let Some(lu) = iter.next() {
        if let LexicalUnit::OperatorComma = lu {
            return Err(invalid_unit(lu));
        }
        args.push(lu);

        match iter.next() {
            Some(LexicalUnit::OperatorComma) => {
                if iter.as_slice().is_empty() {
                    return Err(Error::MalformedLexicalUnit);
                }
            }
            Some(next) => return Err(invalid_unit(next)),
            None => break,
        }
    }

    Ok(args)
}

fn create_color_function(lu: &LexicalUnit) -> Result<Value, Error> {
    let (name, params) = match *lu {
        LexicalUnit::Function { ref name, ref params } => (name.to_ascii_lowercase(), params),
        _ => return Err(invalid_unit(lu)),
    };

    let args = split_arguments(params)?;
    let wrong_count = || Error::InvalidLexicalUnit(Some(LexicalUnitType::Function));

    match name.as_str() {
        "icc-color" => {
            let (profile, channels) = args.split_first().ok_or_else(wrong_count)?;
            let mut color = match profile {
                LexicalUnit::Ident(ref s) => IccColor::new(s),
                _ => return Err(invalid_unit(profile)),
            };

            for arg in channels {
                color.append(create_channel(arg)?);
            }

            Ok(Value::Icc(color))
        }
        "icc-named-color" => match args.as_slice() {
            [LexicalUnit::Ident(ref profile), LexicalUnit::Ident(ref name)] => {
                Ok(Value::IccNamed(IccNamedColor::new(profile, name)))
            }
            [_, _] => Err(Error::InvalidLexicalUnit(Some(LexicalUnitType::Ident))),
            _ => Err(wrong_count()),
        },
        "cielab" | "cielch" => {
            if args.len() != 3 {
                return Err(wrong_count());
            }

            let kind = if name == "cielab" { CieKind::Lab } else { CieKind::Lch };
            let values = [
                create_channel(args[0])?,
                create_channel(args[1])?,
                create_channel(args[2])?,
            ];
            Ok(Value::Cie(CieColor::new(kind, values)))
        }
        "device-gray" | "device-rgb" | "device-cmyk" | "device-nchannel" => {
            let expected = match name.as_str() {
                "device-gray" => Some(1),
                "device-rgb" => Some(3),
                "device-cmyk" => Some(4),
                _ => None,
            };

            if args.is_empty() || expected.map_or(false, |n| n != args.len()) {
                return Err(wrong_count());
            }

            let mut color = DeviceColor::new(expected.is_none());
            for arg in args {
                color.append(create_channel(arg)?);
            }

            Ok(Value::Device(color))
        }
        _ => {
            log::warn!("Unsupported color function: '{}'.", name);
            Err(invalid_unit(lu))
        }
    }
}

fn compute_color(value: &Value, ctx: &mut ComputeContext) -> Value {
    match *value {
        Value::Ident(s) if s == constants::CURRENT_COLOR => {
            ctx.set_color_relative();
            ctx.current_color()
        }
        Value::Rgb(ref c) => Value::Rgb(RgbColor {
            red: compute_component(c.red),
            green: compute_component(c.green),
            blue: compute_component(c.blue),
        }),
        Value::List(ref list) => {
            let items = list.items().iter().map(|v| compute_color(v, ctx)).collect();
            Value::List(ListValue::from_items(list.separator(), items))
        }
        _ => value.clone(),
    }
}

fn compute_component(v: FloatValue) -> FloatValue {
    match v.unit {
        PrimitiveType::Percentage => FloatValue::number(v.value * 255.0 / 100.0),
        _ => v,
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn parse(m: &dyn ValueManager, text: &str) -> Result<Value, Error> {
        m.create_value(&csslex::parse_property_value(text).unwrap())
    }

    macro_rules! test {
        ($name:ident, $manager:expr, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse(&$manager, $text).unwrap().css_text(), $result);
            }
        )
    }

    test!(parse_1, ColorManager::color(), "red", "rgb(255, 0, 0)");
    test!(parse_2, ColorManager::color(), "#0f0", "rgb(0, 255, 0)");
    test!(parse_3, ColorManager::color(), "rgb(10%, 20, 30)", "rgb(10%, 20, 30)");
    test!(parse_4, ColorManager::color(), "LightGray", "rgb(211, 211, 211)");
    test!(parse_5, ColorManager::stop_color(), "currentcolor", "currentColor");
    test!(parse_6, ColorManager::flood_color(), "#CD853F icc-color(acmecmyk, 0.11, 0.48, 0.83, 0.00)",
          "rgb(205, 133, 63) icc-color(acmecmyk, 0.11, 0.48, 0.83, 0)");
    test!(parse_7, ColorManager::flood_color(), "red cielab(62.253, 52.2, -41.6)",
          "rgb(255, 0, 0) cielab(62.253, 52.2, -41.6)");
    test!(parse_8, ColorManager::lighting_color(), "red device-cmyk(0, 1, 1, 0)",
          "rgb(255, 0, 0) device-cmyk(0, 1, 1, 0)");
    test!(parse_9, ColorManager::stop_color(), "red icc-named-color(p, pantone)",
          "rgb(255, 0, 0) icc-named-color(p, pantone)");
    test!(parse_10, ColorManager::stop_color(), "red device-nchannel(0.1, 0.2)",
          "rgb(255, 0, 0) device-nchannel(0.1, 0.2)");
    test!(parse_11, PaintManager::fill(), "none", "none");
    test!(parse_12, PaintManager::fill(), "url(#grad)", "url(#grad)");
    test!(parse_13, PaintManager::fill(), "url(#grad) none", "url(#grad) none");
    test!(parse_14, PaintManager::stroke(), "url(#grad) red icc-color(p, 1)",
          "url(#grad) rgb(255, 0, 0) icc-color(p, 1)");
    test!(parse_15, PaintManager::stroke(), "CurrentColor", "currentColor");

    #[test]
    fn parse_err() {
        assert!(matches!(parse(&ColorManager::color(), "currentColor"), Err(Error::InvalidIdentifier(_))));
        assert!(matches!(parse(&ColorManager::color(), "transparent"), Err(Error::InvalidIdentifier(_))));
        assert!(matches!(parse(&ColorManager::color(), "red icc-color(p, 1)"), Err(Error::InvalidLexicalUnit(_))));
        assert!(matches!(parse(&ColorManager::stop_color(), "red device-rgb(1, 2)"),
                         Err(Error::InvalidLexicalUnit(Some(LexicalUnitType::Function)))));
        assert!(matches!(parse(&ColorManager::stop_color(), "red cielab(1, 2)"),
                         Err(Error::InvalidLexicalUnit(Some(LexicalUnitType::Function)))));
        assert!(matches!(parse(&ColorManager::stop_color(), "red icc-color(p, a)"),
                         Err(Error::InvalidLexicalUnit(Some(LexicalUnitType::Ident)))));
        assert!(matches!(parse(&ColorManager::stop_color(), "red icc-color(p, 1,)"),
                         Err(Error::MalformedLexicalUnit)));
        assert!(parse(&ColorManager::stop_color(), "red blue").is_err());
        assert!(parse(&PaintManager::fill(), "12").is_err());
    }

    #[test]
    fn compute_current_color() {
        let opt = Options::default();
        let mut ctx = ComputeContext::new(&opt, None, 0);
        ctx.set_color(Value::Rgb(RgbColor::new(0.0, 0.0, 255.0)));
        let v = PaintManager::fill().compute_value(&Value::Ident(constants::CURRENT_COLOR), &mut ctx);
        assert_eq!(v.css_text(), "rgb(0, 0, 255)");
        assert_eq!(ctx.take_flags(), crate::style_map::flags::COLOR_RELATIVE);
    }

    #[test]
    fn compute_percentages() {
        let opt = Options::default();
        let mut ctx = ComputeContext::new(&opt, None, 0);
        let m = ColorManager::color();
        let v = m.compute_value(&parse(&m, "rgb(100%, 0%, 20%)").unwrap(), &mut ctx);
        assert_eq!(v.css_text(), "rgb(255, 0, 51)");
    }
}
