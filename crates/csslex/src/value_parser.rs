use crate::stream::{ByteExt, Stream};
use crate::{Error, LexicalUnit, Unit};

/// Tokenizes a CSS property value into lexical units.
///
/// The text is the value part of a declaration, without the property name,
/// the colon and the `!important` flag.
///
/// # Errors
///
/// Returns the first lexical error. A value with a single bad token is invalid as a whole.
///
/// # Examples
///
/// ```
/// use csslex::{parse_property_value, LexicalUnit};
///
/// let units = parse_property_value("Univers 45, serif").unwrap();
/// assert_eq!(units, vec![
///     LexicalUnit::Ident("Univers".to_string()),
///     LexicalUnit::Integer(45),
///     LexicalUnit::OperatorComma,
///     LexicalUnit::Ident("serif".to_string()),
/// ]);
/// ```
pub fn parse_property_value(text: &str) -> Result<Vec<LexicalUnit>, Error> {
    let mut s = Stream::from(text);
    s.parse_units(false)
}

impl<'a> Stream<'a> {
    fn parse_units(&mut self, in_function: bool) -> Result<Vec<LexicalUnit>, Error> {
        let mut units = Vec::new();
        loop {
            self.skip_spaces_and_comments();

            if self.at_end() {
                if in_function {
                    return Err(Error::UnexpectedEndOfStream);
                }

                break;
            }

            if in_function && self.is_curr_byte_eq(b')') {
                self.advance(1);
                break;
            }

            units.push(self.parse_unit()?);
        }

        Ok(units)
    }

    fn parse_unit(&mut self) -> Result<LexicalUnit, Error> {
        let c = self.curr_byte_unchecked();
        match c {
            b',' => {
                self.advance(1);
                Ok(LexicalUnit::OperatorComma)
            }
            b'/' => {
                self.advance(1);
                Ok(LexicalUnit::OperatorSlash)
            }
            b'"' | b'\'' => Ok(LexicalUnit::String(self.parse_quoted_string()?)),
            b'#' => self.parse_hash_color(),
            _ if self.is_number_start() => self.parse_numeric(),
            _ if self.is_ident_start() => self.parse_ident_or_function(),
            _ => Err(Error::UnexpectedData(self.calc_char_pos())),
        }
    }

    fn is_number_start(&self) -> bool {
        let c = self.curr_byte_unchecked();
        let mut s = *self;
        if c.is_sign() {
            s.advance(1);
        }

        match s.curr_byte() {
            Ok(c) if c.is_digit() => true,
            Ok(b'.') => s.next_byte().map(|c| c.is_digit()).unwrap_or(false),
            _ => false,
        }
    }

    fn parse_numeric(&mut self) -> Result<LexicalUnit, Error> {
        let start = self.pos();
        let (n, is_integer) = self.parse_number()?;

        // Values are stored as f32, which overflows long before f64 does.
        let real = n as f32;
        if !real.is_finite() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        if self.is_curr_byte_eq(b'%') {
            self.advance(1);
            return Ok(LexicalUnit::Dimension(real, Unit::Percent));
        }

        if self.is_ident_start() {
            let unit = self.parse_ident()?;
            return Ok(LexicalUnit::Dimension(real, Unit::from_text(unit)));
        }

        if is_integer {
            if n >= i32::MIN as f64 && n <= i32::MAX as f64 {
                return Ok(LexicalUnit::Integer(n as i32));
            }

            log::debug!(
                "Integer at position {} is out of range. Stored as a real.",
                self.calc_char_pos_at(start)
            );
        }

        Ok(LexicalUnit::Real(real))
    }

    // `#rgb` and `#rrggbb` are stored the same way as `rgb(r, g, b)`.
    fn parse_hash_color(&mut self) -> Result<LexicalUnit, Error> {
        self.consume_byte(b'#')?;
        let hex = self.consume_name();
        if !hex.bytes().all(|c| c.is_hex_digit()) {
            return Err(Error::InvalidValue);
        }

        let components = match hex.len() {
            3 => {
                let mut v = [0u8; 3];
                for (i, c) in hex.bytes().enumerate() {
                    let d = hex_value(c);
                    v[i] = d * 16 + d;
                }
                v
            }
            6 => {
                let b = hex.as_bytes();
                [
                    hex_value(b[0]) * 16 + hex_value(b[1]),
                    hex_value(b[2]) * 16 + hex_value(b[3]),
                    hex_value(b[4]) * 16 + hex_value(b[5]),
                ]
            }
            _ => return Err(Error::InvalidValue),
        };

        Ok(LexicalUnit::RgbColor(vec![
            LexicalUnit::Integer(components[0] as i32),
            LexicalUnit::OperatorComma,
            LexicalUnit::Integer(components[1] as i32),
            LexicalUnit::OperatorComma,
            LexicalUnit::Integer(components[2] as i32),
        ]))
    }

    fn parse_ident_or_function(&mut self) -> Result<LexicalUnit, Error> {
        let name = self.parse_ident()?;

        if !self.is_curr_byte_eq(b'(') {
            if name.eq_ignore_ascii_case("inherit") {
                return Ok(LexicalUnit::Inherit);
            }

            return Ok(LexicalUnit::Ident(name.to_string()));
        }

        self.advance(1);

        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "url" => self.parse_url_tail(),
            "rgb" => Ok(LexicalUnit::RgbColor(self.parse_units(true)?)),
            "rect" => Ok(LexicalUnit::RectFunction(self.parse_units(true)?)),
            _ => Ok(LexicalUnit::Function {
                name: name.to_string(),
                params: self.parse_units(true)?,
            }),
        }
    }

    // Parses `url(` content, the opening bracket is already consumed.
    fn parse_url_tail(&mut self) -> Result<LexicalUnit, Error> {
        self.skip_spaces();

        let link = if self.curr_byte()?.is_quote() {
            self.parse_quoted_string()?
        } else {
            self.consume_bytes(|_, c| c != b')' && !c.is_space())
                .to_string()
        };

        self.skip_spaces();
        self.consume_byte(b')')?;

        Ok(LexicalUnit::Uri(link))
    }
}

#[inline]
fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> LexicalUnit {
        LexicalUnit::Ident(s.to_string())
    }

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse_property_value($text).unwrap(), $result);
            }
        )
    }

    test!(parse_1, "inherit", vec![LexicalUnit::Inherit]);
    test!(parse_2, "INHERIT", vec![LexicalUnit::Inherit]);
    test!(parse_3, "10", vec![LexicalUnit::Integer(10)]);
    test!(parse_4, "-1.5", vec![LexicalUnit::Real(-1.5)]);
    test!(parse_5, "10px", vec![LexicalUnit::Dimension(10.0, Unit::Px)]);
    test!(parse_6, "50%", vec![LexicalUnit::Dimension(50.0, Unit::Percent)]);
    test!(parse_7, "1.2em 3mm", vec![
        LexicalUnit::Dimension(1.2, Unit::Em),
        LexicalUnit::Dimension(3.0, Unit::Mm),
    ]);
    test!(parse_8, "'Times New Roman', serif", vec![
        LexicalUnit::String("Times New Roman".to_string()),
        LexicalUnit::OperatorComma,
        ident("serif"),
    ]);
    test!(parse_9, "Univers 45 Light", vec![
        ident("Univers"),
        LexicalUnit::Integer(45),
        ident("Light"),
    ]);
    test!(parse_10, "#f00", vec![LexicalUnit::RgbColor(vec![
        LexicalUnit::Integer(255),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(0),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(0),
    ])]);
    test!(parse_11, "#102030", vec![LexicalUnit::RgbColor(vec![
        LexicalUnit::Integer(16),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(32),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(48),
    ])]);
    test!(parse_12, "rgb(10%, 20, 30)", vec![LexicalUnit::RgbColor(vec![
        LexicalUnit::Dimension(10.0, Unit::Percent),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(20),
        LexicalUnit::OperatorComma,
        LexicalUnit::Integer(30),
    ])]);
    test!(parse_13, "url(#marker)", vec![LexicalUnit::Uri("#marker".to_string())]);
    test!(parse_14, "url( 'a b.svg' )", vec![LexicalUnit::Uri("a b.svg".to_string())]);
    test!(parse_15, "rect(1px, auto, 3px, 4px)", vec![LexicalUnit::RectFunction(vec![
        LexicalUnit::Dimension(1.0, Unit::Px),
        LexicalUnit::OperatorComma,
        ident("auto"),
        LexicalUnit::OperatorComma,
        LexicalUnit::Dimension(3.0, Unit::Px),
        LexicalUnit::OperatorComma,
        LexicalUnit::Dimension(4.0, Unit::Px),
    ])]);
    test!(parse_16, "icc-color(prof, 0.5)", vec![LexicalUnit::Function {
        name: "icc-color".to_string(),
        params: vec![ident("prof"), LexicalUnit::OperatorComma, LexicalUnit::Real(0.5)],
    }]);
    test!(parse_17, "a /* note */ b", vec![ident("a"), ident("b")]);
    test!(parse_18, "12/14", vec![
        LexicalUnit::Integer(12),
        LexicalUnit::OperatorSlash,
        LexicalUnit::Integer(14),
    ]);
    test!(parse_19, "", vec![]);
    test!(parse_20, "90deg", vec![LexicalUnit::Dimension(90.0, Unit::Deg)]);

    macro_rules! test_err {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse_property_value($text).unwrap_err().to_string(), $result);
            }
        )
    }

    test_err!(parse_err_1, "#ff", "invalid value");
    test_err!(parse_err_2, "#ggg", "invalid value");
    test_err!(parse_err_3, "rgb(1, 2", "unexpected end of stream");
    test_err!(parse_err_4, "a ; b", "unexpected data at position 3");
    test_err!(parse_err_5, "url(a.svg", "unexpected end of stream");
    test_err!(parse_err_6, "url(a b)", "expected ')' not 'b' at position 7");
    test_err!(parse_err_7, "1e39", "invalid number at position 1");
    test_err!(parse_err_8, "2 -1e39px", "invalid number at position 3");
}
