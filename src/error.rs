// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::LexicalUnitType;

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// A lexical unit of an unexpected type.
    ///
    /// `None` means that the value ended where a unit was expected.
    InvalidLexicalUnit(Option<LexicalUnitType>),

    /// A lexical unit sequence is incomplete.
    ///
    /// For example, a dangling comma in a `font-family` list.
    MalformedLexicalUnit,

    /// An identifier that is not allowed for a property.
    InvalidIdentifier(String),

    /// An unknown property name.
    UnknownProperty(String),

    /// A property registered twice.
    DuplicatedProperty(String),

    /// A color channel index is out of range.
    ChannelOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of channels.
        len: usize,
    },

    /// A value was constructed in a way that can't be serialized.
    InternalConsistency(&'static str),

    /// Failed to tokenize a property value or a selector.
    Syntax(csslex::Error),

    /// Failed to parse an XML data.
    ParsingFailed(roxmltree::Error),
}

impl Error {
    /// Checks that the error affects only a single declaration.
    ///
    /// Such errors are logged and the declaration is skipped.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::ChannelOutOfRange { .. }
                | Error::InternalConsistency(_)
                | Error::DuplicatedProperty(_)
        )
    }
}

impl From<csslex::Error> for Error {
    fn from(e: csslex::Error) -> Self {
        Error::Syntax(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidLexicalUnit(Some(kind)) => {
                write!(f, "invalid lexical unit: {}", kind)
            }
            Error::InvalidLexicalUnit(None) => {
                write!(f, "invalid lexical unit: unexpected end of value")
            }
            Error::MalformedLexicalUnit => {
                write!(f, "malformed lexical unit")
            }
            Error::InvalidIdentifier(ref name) => {
                write!(f, "invalid identifier '{}'", name)
            }
            Error::UnknownProperty(ref name) => {
                write!(f, "unknown property '{}'", name)
            }
            Error::DuplicatedProperty(ref name) => {
                write!(f, "property '{}' is already registered", name)
            }
            Error::ChannelOutOfRange { index, len } => {
                write!(
                    f,
                    "channel index {} is out of range, the color has {} channels",
                    index, len
                )
            }
            Error::InternalConsistency(msg) => {
                write!(f, "internal consistency error: {}", msg)
            }
            Error::Syntax(ref e) => {
                write!(f, "syntax error: {}", e)
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}
