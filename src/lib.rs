// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgcss` is an SVG 1.1 CSS engine.

It parses style sheets, property values and selectors, resolves the cascade
and computes the final value of every SVG property of every element.

## Features

- All SVG 1.1 and CSS2 properties SVG uses, with strongly-typed values
- `<style>` elements, `style` attributes, presentation attributes,
  user and `xml-stylesheet` style sheets
- CSS2 selectors: type, class, id, attribute (`=`, `~=`, `|=`),
  descendant, child, adjacent sibling, `:first-child` and `:lang()`
- SVG color extensions: `icc-color()`, `icc-named-color()`, CIE Lab/LCH and device colors
- Relative values (`em`, `%`, `bolder`, `currentColor`, etc.) are resolved
  and the dependency is recorded

## Limitations

- At-rules, like `@media` and `@import`, are ignored
- The `font` shorthand is not supported
- Only static documents: dynamic pseudo-classes never match
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod document;
mod engine;
mod error;
pub mod managers;
mod options;
mod registry;
pub mod selector;
mod style_map;
mod stylesheet;
pub mod value;

pub use document::{StyledDocument, XmlElement};
pub use engine::{CssEngine, USER_AGENT_STYLE_SHEET};
pub use error::Error;
pub use options::{Options, StyleSheetResolverFn};
pub use registry::{Registry, COLOR_INDEX, FONT_SIZE_INDEX};
pub use style_map::{flags, Origin, StyleMap};
pub use stylesheet::{parse_declarations, Declaration, Rule, StyleSheet};
pub use value::Value;

pub use csslex;
