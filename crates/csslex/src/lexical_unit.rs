use std::fmt;

/// A dimension unit.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Unit {
    Em,
    Ex,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    Percent,
    Deg,
    Rad,
    Grad,
    Ms,
    S,
    Hz,
    KHz,
    /// A dimension with an unknown unit. Holds the unit text as written.
    Other(String),
}

impl Unit {
    /// Creates a unit from its textual representation.
    ///
    /// Known units are matched ignoring case.
    pub fn from_text(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "px" => Unit::Px,
            "in" => Unit::In,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "pt" => Unit::Pt,
            "pc" => Unit::Pc,
            "%" => Unit::Percent,
            "deg" => Unit::Deg,
            "rad" => Unit::Rad,
            "grad" => Unit::Grad,
            "ms" => Unit::Ms,
            "s" => Unit::S,
            "hz" => Unit::Hz,
            "khz" => Unit::KHz,
            _ => Unit::Other(text.to_string()),
        }
    }

    /// Returns the canonical unit text.
    pub fn unit_text(&self) -> &str {
        match self {
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Percent => "%",
            Unit::Deg => "deg",
            Unit::Rad => "rad",
            Unit::Grad => "grad",
            Unit::Ms => "ms",
            Unit::S => "s",
            Unit::Hz => "Hz",
            Unit::KHz => "kHz",
            Unit::Other(ref text) => text,
        }
    }
}

/// A lexical unit type.
///
/// A copyable discriminant of [`LexicalUnit`].
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LexicalUnitType {
    OperatorComma,
    OperatorSlash,
    Inherit,
    Integer,
    Real,
    Dimension,
    Ident,
    String,
    Uri,
    RgbColor,
    RectFunction,
    Function,
}

impl fmt::Display for LexicalUnitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LexicalUnitType::OperatorComma => "comma",
            LexicalUnitType::OperatorSlash => "slash",
            LexicalUnitType::Inherit => "inherit",
            LexicalUnitType::Integer => "integer",
            LexicalUnitType::Real => "real",
            LexicalUnitType::Dimension => "dimension",
            LexicalUnitType::Ident => "ident",
            LexicalUnitType::String => "string",
            LexicalUnitType::Uri => "uri",
            LexicalUnitType::RgbColor => "rgb color",
            LexicalUnitType::RectFunction => "rect function",
            LexicalUnitType::Function => "function",
        };

        write!(f, "{}", name)
    }
}

/// A single token of a CSS property value.
#[derive(Clone, PartialEq, Debug)]
pub enum LexicalUnit {
    /// `,`
    OperatorComma,
    /// `/`
    OperatorSlash,
    /// The `inherit` keyword.
    Inherit,
    /// A number written without a fraction or an exponent.
    Integer(i32),
    /// A number with a fraction or an exponent.
    Real(f32),
    /// A number followed by a unit.
    Dimension(f32, Unit),
    /// An identifier, case preserved.
    Ident(String),
    /// A quoted string with escapes resolved.
    String(String),
    /// A `url()` reference.
    Uri(String),
    /// `rgb(r, g, b)` or a `#hex` color.
    ///
    /// Parameters are three numeric units separated by `OperatorComma`.
    RgbColor(Vec<LexicalUnit>),
    /// `rect(top, right, bottom, left)`.
    RectFunction(Vec<LexicalUnit>),
    /// Any other function.
    Function {
        /// The function name, case preserved.
        name: String,
        /// The function parameters, separators included.
        params: Vec<LexicalUnit>,
    },
}

impl LexicalUnit {
    /// Returns the unit type.
    pub fn unit_type(&self) -> LexicalUnitType {
        match self {
            LexicalUnit::OperatorComma => LexicalUnitType::OperatorComma,
            LexicalUnit::OperatorSlash => LexicalUnitType::OperatorSlash,
            LexicalUnit::Inherit => LexicalUnitType::Inherit,
            LexicalUnit::Integer(_) => LexicalUnitType::Integer,
            LexicalUnit::Real(_) => LexicalUnitType::Real,
            LexicalUnit::Dimension(..) => LexicalUnitType::Dimension,
            LexicalUnit::Ident(_) => LexicalUnitType::Ident,
            LexicalUnit::String(_) => LexicalUnitType::String,
            LexicalUnit::Uri(_) => LexicalUnitType::Uri,
            LexicalUnit::RgbColor(_) => LexicalUnitType::RgbColor,
            LexicalUnit::RectFunction(_) => LexicalUnitType::RectFunction,
            LexicalUnit::Function { .. } => LexicalUnitType::Function,
        }
    }

    /// Returns the numeric value of an integer, real or dimension unit.
    pub fn float_value(&self) -> Option<f32> {
        match *self {
            LexicalUnit::Integer(n) => Some(n as f32),
            LexicalUnit::Real(n) => Some(n),
            LexicalUnit::Dimension(n, _) => Some(n),
            _ => None,
        }
    }

    /// Returns the text of an ident, string or uri unit.
    pub fn string_value(&self) -> Option<&str> {
        match self {
            LexicalUnit::Ident(ref s) | LexicalUnit::String(ref s) | LexicalUnit::Uri(ref s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Checks that the unit is an ident equal to `name`, ignoring ASCII case.
    pub fn is_ident(&self, name: &str) -> bool {
        match self {
            LexicalUnit::Ident(ref s) => s.eq_ignore_ascii_case(name),
            _ => false,
        }
    }
}

fn write_params(f: &mut fmt::Formatter, params: &[LexicalUnit]) -> fmt::Result {
    let mut prev_is_operator = true;
    for unit in params {
        let is_operator = matches!(
            unit,
            LexicalUnit::OperatorComma | LexicalUnit::OperatorSlash
        );
        if !prev_is_operator && !is_operator {
            write!(f, " ")?;
        }

        match unit {
            LexicalUnit::OperatorComma => write!(f, ", ")?,
            _ => write!(f, "{}", unit)?,
        }
        prev_is_operator = is_operator;
    }

    Ok(())
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexicalUnit::OperatorComma => write!(f, ","),
            LexicalUnit::OperatorSlash => write!(f, "/"),
            LexicalUnit::Inherit => write!(f, "inherit"),
            LexicalUnit::Integer(n) => write!(f, "{}", n),
            LexicalUnit::Real(n) => write!(f, "{}", n),
            LexicalUnit::Dimension(n, ref unit) => write!(f, "{}{}", n, unit.unit_text()),
            LexicalUnit::Ident(ref s) => write!(f, "{}", s),
            LexicalUnit::String(ref s) => write!(f, "{:?}", s),
            LexicalUnit::Uri(ref s) => write!(f, "url({})", s),
            LexicalUnit::RgbColor(ref params) => {
                write!(f, "rgb(")?;
                write_params(f, params)?;
                write!(f, ")")
            }
            LexicalUnit::RectFunction(ref params) => {
                write!(f, "rect(")?;
                write_params(f, params)?;
                write!(f, ")")
            }
            LexicalUnit::Function { ref name, ref params } => {
                write!(f, "{}(", name)?;
                write_params(f, params)?;
                write!(f, ")")
            }
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(Unit::from_text($text).unit_text(), $result);
            }
        )
    }

    test!(unit_1, "px", "px");
    test!(unit_2, "PX", "px");
    test!(unit_3, "%", "%");
    test!(unit_4, "khz", "kHz");
    test!(unit_5, "vw", "vw");

    #[test]
    fn display_1() {
        let unit = LexicalUnit::RgbColor(vec![
            LexicalUnit::Integer(1),
            LexicalUnit::OperatorComma,
            LexicalUnit::Integer(2),
            LexicalUnit::OperatorComma,
            LexicalUnit::Integer(3),
        ]);
        assert_eq!(unit.to_string(), "rgb(1, 2, 3)");
    }

    #[test]
    fn is_ident_1() {
        assert!(LexicalUnit::Ident("Serif".to_string()).is_ident("serif"));
        assert!(!LexicalUnit::String("serif".to_string()).is_ident("serif"));
    }
}
