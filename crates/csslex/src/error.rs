use std::fmt;

/// A property value tokenizing error.
///
/// Positions are 1-based and counted in characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The value ended inside a string, a comment or a function.
    UnexpectedEndOfStream,

    /// A byte that can't start any lexical unit.
    UnexpectedData(usize),

    /// A malformed value, like a hex color with five digits.
    InvalidValue,

    /// An ident that starts with a digit or contains no name characters.
    InvalidIdent,

    /// A byte other than the expected one.
    InvalidChar {
        /// The expected byte.
        expected: u8,
        /// The byte found instead.
        actual: u8,
        /// The position of `actual`.
        pos: usize,
    },

    /// A malformed number.
    InvalidNumber(usize),
}

impl Error {
    /// Returns the error position, when known.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Error::UnexpectedData(pos)
            | Error::InvalidChar { pos, .. }
            | Error::InvalidNumber(pos) => Some(pos),
            Error::UnexpectedEndOfStream | Error::InvalidValue | Error::InvalidIdent => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => write!(f, "unexpected end of stream"),
            Error::UnexpectedData(pos) => write!(f, "unexpected data at position {}", pos),
            Error::InvalidValue => write!(f, "invalid value"),
            Error::InvalidIdent => write!(f, "invalid ident"),
            Error::InvalidChar { expected, actual, pos } => write!(
                f,
                "expected '{}' not '{}' at position {}",
                expected as char, actual as char, pos
            ),
            Error::InvalidNumber(pos) => write!(f, "invalid number at position {}", pos),
        }
    }
}

impl std::error::Error for Error {}
