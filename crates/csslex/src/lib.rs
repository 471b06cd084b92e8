/*!
*csslex* is a tokenizer for CSS property values.

It turns a declaration value, like `"Univers 45 Light", serif`, into a sequence of
[`LexicalUnit`]s: operators, numbers, dimensions, identifiers, strings, URIs and functions.
Interpreting those units is left to the caller.

## Supported tokens

- `,` and `/` operators
- `inherit`
- integers, reals and dimensions, e.g. `10`, `-.5`, `12px`, `50%`, `90deg`
- identifiers and quoted strings
- `url()`, quoted or not
- `#rgb`, `#rrggbb` and `rgb()`, all stored as an RGB color unit
- `rect()` and any other function, with nested parameters

## Limitations

- Escapes are resolved only inside quoted strings.
- Comments are skipped, but `<!--` and `-->` are not.

## Safety

- The library should not panic. Any panic considered as a critical bug and should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(missing_copy_implementations)]

mod error;
mod lexical_unit;
mod stream;
mod value_parser;

pub use crate::error::*;
pub use crate::lexical_unit::*;
pub use crate::stream::Stream;
pub use crate::value_parser::*;
