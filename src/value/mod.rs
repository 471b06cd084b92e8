// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Resolved CSS values.

use std::fmt;

use csslex::{LexicalUnit, Unit};

use crate::Error;

mod color;
pub mod constants;

pub use color::*;
pub use constants::StringMap;

/// A float value unit.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PrimitiveType {
    Number,
    Percentage,
    Em,
    Ex,
    Px,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
    Deg,
    Rad,
    Grad,
    Ms,
    S,
    Hz,
    KHz,
}

impl PrimitiveType {
    /// Returns the unit text appended to a number.
    pub fn unit_text(self) -> &'static str {
        match self {
            PrimitiveType::Number => "",
            PrimitiveType::Percentage => "%",
            PrimitiveType::Em => "em",
            PrimitiveType::Ex => "ex",
            PrimitiveType::Px => "px",
            PrimitiveType::Cm => "cm",
            PrimitiveType::Mm => "mm",
            PrimitiveType::In => "in",
            PrimitiveType::Pt => "pt",
            PrimitiveType::Pc => "pc",
            PrimitiveType::Deg => "deg",
            PrimitiveType::Rad => "rad",
            PrimitiveType::Grad => "grad",
            PrimitiveType::Ms => "ms",
            PrimitiveType::S => "s",
            PrimitiveType::Hz => "Hz",
            PrimitiveType::KHz => "kHz",
        }
    }

    /// Checks that the unit is a length or a percentage.
    pub fn is_length(self) -> bool {
        matches!(
            self,
            PrimitiveType::Number
                | PrimitiveType::Percentage
                | PrimitiveType::Em
                | PrimitiveType::Ex
                | PrimitiveType::Px
                | PrimitiveType::Cm
                | PrimitiveType::Mm
                | PrimitiveType::In
                | PrimitiveType::Pt
                | PrimitiveType::Pc
        )
    }

    /// Checks that the unit is an angle.
    pub fn is_angle(self) -> bool {
        matches!(
            self,
            PrimitiveType::Deg | PrimitiveType::Rad | PrimitiveType::Grad
        )
    }

    fn from_unit(unit: &Unit) -> Option<Self> {
        let t = match unit {
            Unit::Em => PrimitiveType::Em,
            Unit::Ex => PrimitiveType::Ex,
            Unit::Px => PrimitiveType::Px,
            Unit::In => PrimitiveType::In,
            Unit::Cm => PrimitiveType::Cm,
            Unit::Mm => PrimitiveType::Mm,
            Unit::Pt => PrimitiveType::Pt,
            Unit::Pc => PrimitiveType::Pc,
            Unit::Percent => PrimitiveType::Percentage,
            Unit::Deg => PrimitiveType::Deg,
            Unit::Rad => PrimitiveType::Rad,
            Unit::Grad => PrimitiveType::Grad,
            Unit::Ms => PrimitiveType::Ms,
            Unit::S => PrimitiveType::S,
            Unit::Hz => PrimitiveType::Hz,
            Unit::KHz => PrimitiveType::KHz,
            Unit::Other(_) => return None,
        };

        Some(t)
    }
}

/// A number with a unit.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FloatValue {
    /// The unit.
    pub unit: PrimitiveType,
    /// The number.
    pub value: f32,
}

impl FloatValue {
    /// Creates a new value.
    #[inline]
    pub const fn new(unit: PrimitiveType, value: f32) -> Self {
        FloatValue { unit, value }
    }

    /// Creates a unitless number.
    #[inline]
    pub const fn number(value: f32) -> Self {
        FloatValue::new(PrimitiveType::Number, value)
    }

    /// Converts a numeric lexical unit.
    ///
    /// Returns `None` for non-numeric units and unknown dimensions.
    pub fn from_lexical_unit(lu: &LexicalUnit) -> Option<Self> {
        match *lu {
            LexicalUnit::Integer(n) => Some(FloatValue::number(n as f32)),
            LexicalUnit::Real(n) => Some(FloatValue::number(n)),
            LexicalUnit::Dimension(n, ref unit) => {
                PrimitiveType::from_unit(unit).map(|t| FloatValue::new(t, n))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_number(f, self.value)?;
        write!(f, "{}", self.unit.unit_text())
    }
}

const NUMBER_PRECISION: f64 = 10_000.0;

// Whole numbers are written without a fraction, so 1.0 becomes `1`.
pub(crate) fn write_number(f: &mut fmt::Formatter, n: f32) -> fmt::Result {
    if !n.is_finite() || n.abs() >= 1.0e9 {
        return write!(f, "{}", n);
    }

    // Round to 4 digits, so 30 / 1.2 is written as `25` and not as `24.999998`.
    let n = (n as f64 * NUMBER_PRECISION).round() / NUMBER_PRECISION;
    if n.fract() == 0.0 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

/// An `rgb()` color.
///
/// Components are numbers or percentages, as specified.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct RgbColor {
    pub red: FloatValue,
    pub green: FloatValue,
    pub blue: FloatValue,
}

impl RgbColor {
    /// Creates a color from 0..255 components.
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        RgbColor {
            red: FloatValue::number(red),
            green: FloatValue::number(green),
            blue: FloatValue::number(blue),
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// A `rect()` shape.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct RectValue {
    pub top: Value,
    pub right: Value,
    pub bottom: Value,
    pub left: Value,
}

impl fmt::Display for RectValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rect({}, {}, {}, {})",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// An ordered list of values.
#[derive(Clone, PartialEq, Debug)]
pub struct ListValue {
    separator: char,
    items: Vec<Value>,
}

impl ListValue {
    /// Creates an empty list.
    ///
    /// `separator` is either `,` or ` `.
    pub fn new(separator: char) -> Self {
        ListValue {
            separator,
            items: Vec::new(),
        }
    }

    /// Creates a list from items.
    pub fn from_items(separator: char, items: Vec<Value>) -> Self {
        ListValue { separator, items }
    }

    /// Appends an item.
    pub fn append(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Returns the items separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns an item.
    pub fn item(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Returns all items.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks that the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i != 0 {
                if self.separator == ' ' {
                    write!(f, " ")?;
                } else {
                    write!(f, "{} ", self.separator)?;
                }
            }

            write!(f, "{}", item)?;
        }

        Ok(())
    }
}

/// A resolved CSS value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// The `inherit` keyword.
    Inherit,
    /// An interned keyword.
    ///
    /// Keywords are shared between all values, see [`Value::is_same_keyword`].
    Ident(&'static str),
    /// A string, rendered quoted.
    String(String),
    /// A URI reference.
    Uri {
        /// The text as written in the style sheet.
        specified: String,
        /// The text resolved against the base URI.
        absolute: String,
    },
    /// A number with a unit.
    Float(FloatValue),
    /// An sRGB color.
    Rgb(RgbColor),
    /// A `rect()` shape.
    Rect(Box<RectValue>),
    /// A comma or space separated list.
    List(ListValue),
    /// A CIE Lab or LCH color.
    Cie(CieColor),
    /// A device color.
    Device(DeviceColor),
    /// An `icc-color()`.
    Icc(IccColor),
    /// An `icc-named-color()`.
    IccNamed(IccNamedColor),
}

impl Value {
    /// Creates a URI value that is already absolute.
    pub fn uri(text: &str) -> Self {
        Value::Uri {
            specified: text.to_string(),
            absolute: text.to_string(),
        }
    }

    /// Returns the canonical CSS text.
    ///
    /// Numbers are rounded to 4 fractional digits.
    pub fn css_text(&self) -> String {
        self.to_string()
    }

    /// Returns the number of a float value.
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Value::Float(ref v) => Some(v.value),
            _ => None,
        }
    }

    /// Returns the keyword of an ident value.
    pub fn as_ident(&self) -> Option<&'static str> {
        match *self {
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list of a list value.
    pub fn as_list(&self) -> Option<&ListValue> {
        match *self {
            Value::List(ref list) => Some(list),
            _ => None,
        }
    }

    /// Checks that both values are the same shared keyword.
    ///
    /// Unlike `==`, this compares the keyword addresses,
    /// so only keywords taken from [`constants`] are equal.
    pub fn is_same_keyword(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Ident(a), Value::Ident(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }

    /// Checks that the value is the `inherit` keyword.
    #[inline]
    pub fn is_inherit(&self) -> bool {
        matches!(self, Value::Inherit)
    }
}

impl From<FloatValue> for Value {
    fn from(v: FloatValue) -> Self {
        Value::Float(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Inherit => write!(f, "inherit"),
            Value::Ident(s) => write!(f, "{}", s),
            Value::String(ref s) => {
                let quote = if s.contains('"') { '\'' } else { '"' };
                write!(f, "{}{}{}", quote, s, quote)
            }
            Value::Uri { ref specified, .. } => write!(f, "url({})", specified),
            Value::Float(ref v) => write!(f, "{}", v),
            Value::Rgb(ref v) => write!(f, "{}", v),
            Value::Rect(ref v) => write!(f, "{}", v),
            Value::List(ref v) => write!(f, "{}", v),
            Value::Cie(ref v) => write!(f, "{}", v),
            Value::Device(ref v) => write!(f, "{}", v),
            Value::Icc(ref v) => write!(f, "{}", v),
            Value::IccNamed(ref v) => write!(f, "{}", v),
        }
    }
}

/// Converts a numeric unit or returns `InvalidLexicalUnit`.
pub(crate) fn float_from_unit(lu: &LexicalUnit) -> Result<FloatValue, Error> {
    FloatValue::from_lexical_unit(lu).ok_or(Error::InvalidLexicalUnit(Some(lu.unit_type())))
}
