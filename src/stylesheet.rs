// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::Stream;

use crate::selector::{parse_selector_group, Element, Selector};
use crate::{Origin, Registry, Value};

/// A parsed property declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Declaration {
    /// The property index in the [`Registry`].
    pub index: usize,
    /// The specified value.
    pub value: Value,
    /// The `!important` flag.
    pub important: bool,
}

/// A style rule with a single selector.
///
/// A rule like `a, b { ... }` is stored as two rules with the same declarations.
#[derive(Clone, Debug)]
pub struct Rule {
    /// The selector.
    pub selector: Selector,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// A style sheet.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    origin: Origin,
    rules: Vec<Rule>,
}

impl StyleSheet {
    /// Creates an empty style sheet.
    pub fn new(origin: Origin) -> Self {
        StyleSheet {
            origin,
            rules: Vec::new(),
        }
    }

    /// Parses a style sheet.
    ///
    /// Never fails. Invalid rules and declarations are logged and skipped.
    pub fn parse(text: &str, origin: Origin, registry: &Registry) -> Self {
        let mut sheet = StyleSheet::new(origin);
        sheet.parse_more(text, registry);
        sheet
    }

    /// Parses and appends more rules.
    pub fn parse_more(&mut self, text: &str, registry: &Registry) {
        let mut s = Stream::from(text);
        loop {
            skip_spaces_and_cdata_markers(&mut s);
            if s.at_end() {
                break;
            }

            if s.is_curr_byte_eq(b'@') {
                skip_at_rule(&mut s);
                continue;
            }

            let prelude = consume_until(&mut s, |c| c == b'{');
            if s.at_end() {
                log::warn!("A rule without a declarations block: '{}'.", prelude.trim());
                break;
            }

            s.advance(1); // {
            let block = consume_block(&mut s);

            let selectors = match parse_selector_group(prelude) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("Selector '{}' skipped cause {}.", prelude.trim(), e);
                    continue;
                }
            };

            let declarations = parse_declarations(block, registry);
            for selector in selectors {
                self.rules.push(Rule {
                    selector,
                    declarations: declarations.clone(),
                });
            }
        }
    }

    /// Returns the style sheet origin.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns all rules in source order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterates over rules that match an element.
    pub fn matching_rules<'a, E: Element>(
        &'a self,
        element: &'a E,
    ) -> impl Iterator<Item = (usize, &'a Rule)> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.selector.matches(element))
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks that the style sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parses a declaration block, like a `style` attribute value.
///
/// Shorthands are expanded. Unknown properties and invalid values are logged and skipped.
pub fn parse_declarations(text: &str, registry: &Registry) -> Vec<Declaration> {
    let mut list = Vec::new();
    for declaration in simplecss::DeclarationTokenizer::from(text) {
        match registry.parse_declaration(declaration.name, declaration.value) {
            Ok(values) => {
                for (index, value) in values {
                    list.push(Declaration {
                        index,
                        value,
                        important: declaration.important,
                    });
                }
            }
            Err(e) => {
                log::warn!(
                    "Declaration '{}: {}' skipped cause {}.",
                    declaration.name,
                    declaration.value,
                    e
                );
            }
        }
    }

    list
}

// `<!--` and `-->` are allowed around style sheets embedded in XML.
fn skip_spaces_and_cdata_markers(s: &mut Stream) {
    loop {
        s.skip_spaces_and_comments();
        if s.starts_with(b"<!--") {
            s.advance(4);
        } else if s.starts_with(b"-->") {
            s.advance(3);
        } else {
            break;
        }
    }
}

fn skip_at_rule(s: &mut Stream) {
    let prelude = consume_until(s, |c| c == b';' || c == b'{');
    match s.curr_byte() {
        Ok(b';') => s.advance(1),
        Ok(_) => {
            s.advance(1);
            consume_block(s);
        }
        Err(_) => {}
    }

    log::warn!("At-rule '{}' is not supported.", prelude.trim());
}

fn skip_string(s: &mut Stream) {
    if s.parse_quoted_string().is_err() {
        s.jump_to_end();
    }
}

// Consumes text until a stop byte, not including it. Strings and comments are skipped as a whole.
fn consume_until<'a, F>(s: &mut Stream<'a>, stop: F) -> &'a str
where
    F: Fn(u8) -> bool,
{
    let start = s.pos();
    while !s.at_end() {
        match s.curr_byte_unchecked() {
            c if stop(c) => break,
            b'"' | b'\'' => skip_string(s),
            b'/' if s.starts_with(b"/*") => s.skip_spaces_and_comments(),
            _ => s.advance(1),
        }
    }

    s.slice_back(start)
}

// Consumes a block content and the closing brace. Nested blocks are included.
fn consume_block<'a>(s: &mut Stream<'a>) -> &'a str {
    let start = s.pos();
    let mut depth = 0;
    while !s.at_end() {
        match s.curr_byte_unchecked() {
            b'{' => depth += 1,
            b'}' if depth == 0 => {
                let block = s.slice_back(start);
                s.advance(1);
                return block;
            }
            b'}' => depth -= 1,
            b'"' | b'\'' => {
                skip_string(s);
                continue;
            }
            b'/' if s.starts_with(b"/*") => {
                s.skip_spaces_and_comments();
                continue;
            }
            _ => {}
        }

        s.advance(1);
    }

    s.slice_back(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> StyleSheet {
        StyleSheet::parse(text, Origin::Author, &Registry::new())
    }

    #[test]
    fn rules_and_declarations() {
        let sheet = parse("rect, .a { fill: red; stroke: blue !important } circle{opacity:0.5}");
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.rules()[1].selector.to_string(), ".a");
        let decls = &sheet.rules()[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value.css_text(), "rgb(255, 0, 0)");
        assert!(!decls[0].important);
        assert!(decls[1].important);
        assert_eq!(sheet.rules()[2].declarations[0].value.css_text(), "0.5");
    }

    #[test]
    fn invalid_parts_are_skipped() {
        let sheet = parse("rect { fill: 12px; foo: 1; stroke: red } a > > b { fill: red } g { opacity: 1 }");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules()[0].declarations.len(), 1);
        assert_eq!(sheet.rules()[1].selector.to_string(), "g");
    }

    #[test]
    fn at_rules_are_skipped() {
        let sheet = parse("@import url(a.css); @media print { rect { fill: red } } circle { fill: blue }");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules()[0].selector.to_string(), "circle");
    }

    #[test]
    fn comments_and_strings() {
        let sheet = parse("<!-- /* { */ [title='{'] text { font-family: \"a b\", serif } -->");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules()[0].selector.to_string(), "[title=\"{\"] text");
        assert_eq!(sheet.rules()[0].declarations[0].value.css_text(), "\"a b\", serif");
    }

    #[test]
    fn marker_shorthand() {
        let sheet = parse("path { marker: url(#m) }");
        assert_eq!(sheet.rules()[0].declarations.len(), 3);
    }
}
