// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use csslex::{Error as SyntaxError, Stream};

use super::{Condition, Selector};
use crate::Error;

/// Parses a comma separated list of selectors, like `rect.a, g > circle`.
///
/// # Errors
///
/// `Syntax` on the first invalid selector. A group is valid only as a whole.
pub fn parse_selector_group(text: &str) -> Result<Vec<Selector>, Error> {
    let mut s = Stream::from(text);
    let mut list = Vec::new();
    loop {
        s.skip_spaces_and_comments();
        list.push(parse_selector(&mut s)?);
        s.skip_spaces_and_comments();

        if s.at_end() {
            break;
        }

        s.consume_byte(b',')?;
    }

    Ok(list)
}

fn is_pseudo_element(name: &str) -> bool {
    ["first-line", "first-letter", "before", "after"]
        .iter()
        .any(|n| name.eq_ignore_ascii_case(n))
}

fn unexpected_data(s: &Stream) -> SyntaxError {
    if s.at_end() {
        SyntaxError::UnexpectedEndOfStream
    } else {
        SyntaxError::UnexpectedData(s.calc_char_pos())
    }
}

fn parse_selector(s: &mut Stream) -> Result<Selector, SyntaxError> {
    let (mut selector, mut pseudo_element) = parse_simple_selector(s)?;

    // A pseudo-element ends the selector.
    while pseudo_element.is_none() {
        let start = s.pos();
        s.skip_spaces_and_comments();
        let has_spaces = s.pos() != start;

        let combinator = match s.curr_byte() {
            Err(_) | Ok(b',') => break,
            Ok(c @ b'>') | Ok(c @ b'+') => {
                s.advance(1);
                s.skip_spaces_and_comments();
                c
            }
            Ok(_) if has_spaces => b' ',
            Ok(_) => return Err(unexpected_data(s)),
        };

        let (simple, pseudo) = parse_simple_selector(s)?;
        let (prev, simple) = (Box::new(selector), Box::new(simple));
        selector = match combinator {
            b'>' => Selector::Child {
                parent: prev,
                simple,
            },
            b'+' => Selector::DirectAdjacent {
                sibling: prev,
                simple,
            },
            _ => Selector::Descendant {
                ancestor: prev,
                simple,
            },
        };
        pseudo_element = pseudo;
    }

    if let Some(name) = pseudo_element {
        selector = Selector::Child {
            parent: Box::new(selector),
            simple: Box::new(Selector::PseudoElement(name)),
        };
    }

    Ok(selector)
}

// Returns a simple selector and a trailing pseudo-element, if any.
fn parse_simple_selector(s: &mut Stream) -> Result<(Selector, Option<String>), SyntaxError> {
    let start = s.pos();

    let mut selector = if s.is_curr_byte_eq(b'*') {
        s.advance(1);
        Selector::universal()
    } else if s.is_ident_start() {
        Selector::element(s.parse_ident()?)
    } else {
        Selector::universal()
    };

    let mut pseudo_element = None;
    loop {
        let condition = match s.curr_byte() {
            Ok(b'#') => {
                s.advance(1);
                let name = s.consume_name();
                if name.is_empty() {
                    return Err(SyntaxError::InvalidIdent);
                }

                Condition::Id(name.to_string())
            }
            Ok(b'.') => {
                s.advance(1);
                Condition::Class(s.parse_ident()?.to_string())
            }
            Ok(b'[') => {
                s.advance(1);
                parse_attribute(s)?
            }
            Ok(b':') => {
                s.advance(1);
                let is_double = s.is_curr_byte_eq(b':');
                if is_double {
                    s.advance(1);
                }

                let name = s.parse_ident()?;
                if is_double || is_pseudo_element(name) {
                    pseudo_element = Some(name.to_ascii_lowercase());
                    break;
                }

                if s.is_curr_byte_eq(b'(') {
                    if !name.eq_ignore_ascii_case("lang") {
                        return Err(unexpected_data(s));
                    }

                    s.advance(1);
                    s.skip_spaces();
                    let lang = s.parse_ident()?;
                    s.skip_spaces();
                    s.consume_byte(b')')?;
                    Condition::Lang(lang.to_string())
                } else {
                    Condition::PseudoClass(name.to_ascii_lowercase())
                }
            }
            _ => break,
        };

        selector = Selector::conditional(selector, condition);
    }

    if s.pos() == start {
        return Err(unexpected_data(s));
    }

    Ok((selector, pseudo_element))
}

// Parses `name]`, `name=value]`, `name~=value]` or `name|=value]`.
fn parse_attribute(s: &mut Stream) -> Result<Condition, SyntaxError> {
    s.skip_spaces();
    let local_name = s.parse_ident()?.to_string();
    s.skip_spaces();

    let operator = match s.curr_byte()? {
        b']' => {
            s.advance(1);
            return Ok(Condition::Attribute {
                namespace: None,
                local_name,
                value: None,
            });
        }
        b'=' => {
            s.advance(1);
            b'='
        }
        c @ b'~' | c @ b'|' => {
            s.advance(1);
            s.consume_byte(b'=')?;
            c
        }
        _ => return Err(unexpected_data(s)),
    };

    s.skip_spaces();
    let value = match s.curr_byte()? {
        b'"' | b'\'' => s.parse_quoted_string()?,
        _ => s.parse_ident()?.to_string(),
    };
    s.skip_spaces();
    s.consume_byte(b']')?;

    Ok(match operator {
        b'~' => Condition::OneOfAttribute { local_name, value },
        b'|' => Condition::BeginHyphenAttribute { local_name, value },
        _ => Condition::Attribute {
            namespace: None,
            local_name,
            value: Some(value),
        },
    })
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                let list = parse_selector_group($text).unwrap();
                let list: Vec<_> = list.iter().map(|s| s.to_string()).collect();
                assert_eq!(list.join(", "), $result);
            }
        )
    }

    test!(parse_1, "*", "*");
    test!(parse_2, "rect", "rect");
    test!(parse_3, "g rect", "g rect");
    test!(parse_4, "g>rect", "g > rect");
    test!(parse_5, "g  +  rect", "g + rect");
    test!(parse_6, "rect.a.b", "rect.a.b");
    test!(parse_7, "#id", "#id");
    test!(parse_8, "[fill]", "[fill]");
    test!(parse_9, "[fill=red]", "[fill=\"red\"]");
    test!(parse_10, "[class~='a']", "[class~=\"a\"]");
    test!(parse_11, "[lang|=en]", "[lang|=\"en\"]");
    test!(parse_12, "text:first-child", "text:first-child");
    test!(parse_13, "text:lang( en )", "text:lang(en)");
    test!(parse_14, "text:first-line", "text:first-line");
    test!(parse_15, "text::before", "text:before");
    test!(parse_16, "a, b > c , d", "a, b > c, d");
    test!(parse_17, "g /* comment */ rect", "g rect");
    test!(parse_18, "svg g > rect + circle", "svg g > rect + circle");

    macro_rules! test_err {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse_selector_group($text).unwrap_err().to_string(), $result);
            }
        )
    }

    test_err!(parse_err_1, "", "syntax error: unexpected end of stream");
    test_err!(parse_err_2, "a,", "syntax error: unexpected end of stream");
    test_err!(parse_err_3, "a > > b", "syntax error: unexpected data at position 5");
    test_err!(parse_err_4, "a:first-line b", "syntax error: expected ',' not 'b' at position 14");
    test_err!(parse_err_5, "a:hover(1)", "syntax error: unexpected data at position 8");

    #[test]
    fn specificity() {
        let spec = |text| parse_selector_group(text).unwrap()[0].specificity();
        assert_eq!(spec("*"), 0);
        assert_eq!(spec("rect"), 1);
        assert_eq!(spec("g rect"), 2);
        assert_eq!(spec(".a"), 1 << 8);
        assert_eq!(spec("rect#a.b"), (1 << 16) + (1 << 8) + 1);
        assert_eq!(spec("text:first-line"), 2);
    }
}
