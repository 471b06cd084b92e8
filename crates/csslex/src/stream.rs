use std::str::FromStr;

use crate::Error;

/// Extension methods for CSS-subset only operations.
pub(crate) trait ByteExt {
    /// Checks if a byte is a numeric sign.
    fn is_sign(&self) -> bool;

    /// Checks if a byte is a digit.
    ///
    /// `[0-9]`
    fn is_digit(&self) -> bool;

    /// Checks if a byte is a hex digit.
    ///
    /// `[0-9A-Fa-f]`
    fn is_hex_digit(&self) -> bool;

    /// Checks if a byte is a space.
    ///
    /// `[ \r\n\t\f]`
    fn is_space(&self) -> bool;

    fn is_quote(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_sign(&self) -> bool {
        matches!(*self, b'+' | b'-')
    }

    #[inline]
    fn is_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9')
    }

    #[inline]
    fn is_hex_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
    }

    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
    }

    #[inline]
    fn is_quote(&self) -> bool {
        matches!(*self, b'\'' | b'"')
    }
}

pub(crate) trait CharExt {
    fn is_name_start(&self) -> bool;
    fn is_name_char(&self) -> bool;
    fn is_non_ascii(&self) -> bool;
}

impl CharExt for char {
    #[inline]
    fn is_name_start(&self) -> bool {
        match *self {
            '_' | 'a'..='z' | 'A'..='Z' => true,
            _ => self.is_non_ascii(),
        }
    }

    #[inline]
    fn is_name_char(&self) -> bool {
        match *self {
            '_' | 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' => true,
            _ => self.is_non_ascii(),
        }
    }

    #[inline]
    fn is_non_ascii(&self) -> bool {
        *self as u32 >= 0x80
    }
}

/// A streaming text parsing interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the current position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Calculates the current position in chars.
    pub fn calc_char_pos(&self) -> usize {
        self.calc_char_pos_at(self.pos)
    }

    /// Calculates the position in chars for the selected byte position.
    pub fn calc_char_pos_at(&self, byte_pos: usize) -> usize {
        let mut pos = 1;
        for (idx, _) in self.text.char_indices() {
            if idx >= byte_pos {
                break;
            }

            pos += 1;
        }

        pos
    }

    /// Sets current position equal to the end.
    ///
    /// Used to indicate end of parsing on error.
    #[inline]
    pub fn jump_to_end(&mut self) {
        self.pos = self.text.len();
    }

    /// Checks if the stream is reached the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    #[inline]
    pub fn curr_byte(&self) -> Result<u8, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        Ok(self.curr_byte_unchecked())
    }

    /// Returns the remaining text as chars.
    #[inline]
    pub fn chars(&self) -> std::str::Chars<'a> {
        self.text[self.pos..].chars()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Panics
    ///
    /// - if the current position is after the end of the data
    #[inline]
    pub fn curr_byte_unchecked(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Checks that current byte is equal to provided.
    ///
    /// Returns `false` if no bytes left.
    #[inline]
    pub fn is_curr_byte_eq(&self, c: u8) -> bool {
        if !self.at_end() {
            self.curr_byte_unchecked() == c
        } else {
            false
        }
    }

    /// Returns a next byte from a current stream position.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    #[inline]
    pub fn next_byte(&self) -> Result<u8, Error> {
        if self.pos + 1 >= self.text.len() {
            return Err(Error::UnexpectedEndOfStream);
        }

        Ok(self.text.as_bytes()[self.pos + 1])
    }

    /// Advances by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Skips whitespaces.
    ///
    /// Accepted values: `' ' \n \r \t \f`.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_space() {
            self.advance(1);
        }
    }

    /// Skips whitespaces and `/* */` comments.
    ///
    /// An unterminated comment consumes the rest of the stream.
    pub fn skip_spaces_and_comments(&mut self) {
        loop {
            self.skip_spaces();
            if !self.starts_with(b"/*") {
                break;
            }

            self.advance(2);
            match self.text[self.pos..].find("*/") {
                Some(idx) => self.advance(idx + 2),
                None => self.jump_to_end(),
            }
        }
    }

    /// Checks that the stream starts with a selected text.
    ///
    /// We are using `&[u8]` instead of `&str` for performance reasons.
    #[inline]
    pub fn starts_with(&self, text: &[u8]) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(text)
    }

    /// Consumes current byte if it's equal to the provided byte.
    ///
    /// # Errors
    ///
    /// - `InvalidChar`
    /// - `UnexpectedEndOfStream`
    pub fn consume_byte(&mut self, c: u8) -> Result<(), Error> {
        if self.curr_byte()? != c {
            return Err(Error::InvalidChar {
                expected: c,
                actual: self.curr_byte_unchecked(),
                pos: self.calc_char_pos(),
            });
        }

        self.advance(1);
        Ok(())
    }

    /// Checks that the stream is positioned at an ident start.
    ///
    /// Handles the optional leading `-`.
    pub fn is_ident_start(&self) -> bool {
        let mut iter = self.chars();
        match iter.next() {
            Some('-') => iter.next().map(|c| c.is_name_start()).unwrap_or(false),
            Some(c) => c.is_name_start(),
            None => false,
        }
    }

    /// Parses a single [ident](https://drafts.csswg.org/css-syntax-3/#typedef-ident-token).
    ///
    /// # Errors
    ///
    /// - `InvalidIdent`
    pub fn parse_ident(&mut self) -> Result<&'a str, Error> {
        let start = self.pos();

        if self.curr_byte() == Ok(b'-') {
            self.advance(1);
        }

        let mut iter = self.chars();
        if let Some(c) = iter.next() {
            if c.is_name_start() {
                self.advance(c.len_utf8());
            } else {
                return Err(Error::InvalidIdent);
            }
        }

        for c in iter {
            if c.is_name_char() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }

        if start == self.pos() {
            return Err(Error::InvalidIdent);
        }

        Ok(self.slice_back(start))
    }

    /// Consumes a CSS name, i.e. an ident that may start with a digit.
    pub fn consume_name(&mut self) -> &'a str {
        let start = self.pos;
        for c in self.chars() {
            if c.is_name_char() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        self.slice_back(start)
    }

    /// Parses a single [quoted string](https://drafts.csswg.org/css-syntax-3/#typedef-string-token)
    ///
    /// Simple escapes (`\"`, `\'`, `\\`) are resolved, which is why an owned string is returned.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    /// - `InvalidValue`
    pub fn parse_quoted_string(&mut self) -> Result<String, Error> {
        let quote = self.curr_byte()?;

        if !quote.is_quote() {
            return Err(Error::InvalidValue);
        }

        self.advance(1);

        let mut value = String::new();
        let mut chars = self.chars();
        loop {
            match chars.next() {
                Some('\\') => {
                    self.advance(1);
                    match chars.next() {
                        // A line continuation.
                        Some('\n') => self.advance(1),
                        Some(c) => {
                            value.push(c);
                            self.advance(c.len_utf8());
                        }
                        None => return Err(Error::UnexpectedEndOfStream),
                    }
                }
                Some(c) if c as u32 == quote as u32 => {
                    self.advance(1);
                    return Ok(value);
                }
                Some(c) => {
                    value.push(c);
                    self.advance(c.len_utf8());
                }
                None => return Err(Error::UnexpectedEndOfStream),
            }
        }
    }

    /// Consumes bytes by the predicate and returns them.
    ///
    /// The result can be empty.
    pub fn consume_bytes<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(&Stream, u8) -> bool,
    {
        let start = self.pos();
        self.skip_bytes(f);
        self.slice_back(start)
    }

    /// Consumes bytes by the predicate.
    pub fn skip_bytes<F>(&mut self, f: F)
    where
        F: Fn(&Stream, u8) -> bool,
    {
        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if f(self, c) {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Slices data from `pos` to the current position.
    #[inline]
    pub fn slice_back(&self, pos: usize) -> &'a str {
        &self.text[pos..self.pos]
    }

    /// Slices data from the current position to the end.
    #[inline]
    pub fn slice_tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Skips digits.
    pub fn skip_digits(&mut self) {
        self.skip_bytes(|_, c| c.is_digit());
    }

    /// Parses a CSS number.
    ///
    /// Returns the number and whether it was written as an integer,
    /// since `10` and `10.0` are different lexical units.
    ///
    /// # Errors
    ///
    /// - `InvalidNumber`
    pub fn parse_number(&mut self) -> Result<(f64, bool), Error> {
        let start = self.pos();

        if self.at_end() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        if self.curr_byte_unchecked().is_sign() {
            self.advance(1);
        }

        let mut is_integer = true;
        let mut has_digits = false;

        if !self.at_end() && self.curr_byte_unchecked().is_digit() {
            self.skip_digits();
            has_digits = true;
        }

        if self.is_curr_byte_eq(b'.') {
            // Only consume the dot when it's followed by a digit, `1.` is not a number.
            if let Ok(c) = self.next_byte() {
                if c.is_digit() {
                    self.advance(1);
                    self.skip_digits();
                    has_digits = true;
                    is_integer = false;
                }
            }
        }

        if !has_digits {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        // An exponent is allowed only when followed by digits,
        // otherwise `1em` would be treated as an exponent.
        if self.is_curr_byte_eq(b'e') || self.is_curr_byte_eq(b'E') {
            let mut s = *self;
            s.advance(1);
            if !s.at_end() && s.curr_byte_unchecked().is_sign() {
                s.advance(1);
            }

            if !s.at_end() && s.curr_byte_unchecked().is_digit() {
                s.skip_digits();
                *self = s;
                is_integer = false;
            }
        }

        let text = self.slice_back(start);
        match f64::from_str(text) {
            Ok(n) if n.is_finite() => Ok((n, is_integer)),
            _ => Err(Error::InvalidNumber(self.calc_char_pos_at(start))),
        }
    }
}
