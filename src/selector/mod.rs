// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CSS 2 selectors.
//!
//! Selector trees are immutable once parsed and can be matched against any
//! [`Element`] implementation.

use std::fmt;

mod parser;

pub use parser::parse_selector_group;

/// An element interface used for selector matching.
pub trait Element: Sized {
    /// Returns the parent element.
    fn parent_element(&self) -> Option<Self>;

    /// Returns the previous sibling element.
    fn prev_sibling_element(&self) -> Option<Self>;

    /// Returns the element local name.
    fn local_name(&self) -> &str;

    /// Returns the element namespace URI.
    fn namespace(&self) -> Option<&str>;

    /// Returns an attribute value.
    fn attribute(&self, local_name: &str) -> Option<&str>;

    /// Returns the `xml:lang` value set on this element.
    fn lang(&self) -> Option<&str>;

    /// Checks a pseudo-class that depends on a user interaction state,
    /// like `:hover`.
    ///
    /// `:first-child` and `:lang()` are handled by the selector itself.
    fn pseudo_class_matches(&self, _class: &str) -> bool {
        false
    }
}

/// A selector kind.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectorType {
    Element,
    PseudoElement,
    Conditional,
    Descendant,
    Child,
    DirectAdjacent,
}

/// A selector.
#[derive(Clone, PartialEq, Debug)]
pub enum Selector {
    /// A type selector like `rect`, or `*` when `local_name` is `None`.
    Element {
        /// The namespace URI.
        namespace: Option<String>,
        /// The element name.
        local_name: Option<String>,
    },
    /// A pseudo-element like `:first-line`.
    PseudoElement(String),
    /// A simple selector with conditions, like `rect.a`.
    ///
    /// `simple` is never conditional itself.
    Conditional {
        /// The simple selector.
        simple: Box<Selector>,
        /// The condition.
        condition: Condition,
    },
    /// `ancestor simple`
    Descendant {
        /// The ancestor selector.
        ancestor: Box<Selector>,
        /// The selector of the element itself.
        simple: Box<Selector>,
    },
    /// `parent > simple`
    Child {
        /// The parent selector.
        parent: Box<Selector>,
        /// The selector of the element itself.
        simple: Box<Selector>,
    },
    /// `sibling + simple`
    DirectAdjacent {
        /// The previous sibling selector.
        sibling: Box<Selector>,
        /// The selector of the element itself.
        simple: Box<Selector>,
    },
}

impl Selector {
    /// Creates the `*` selector.
    pub fn universal() -> Self {
        Selector::Element {
            namespace: None,
            local_name: None,
        }
    }

    /// Creates a type selector.
    pub fn element(local_name: &str) -> Self {
        Selector::Element {
            namespace: None,
            local_name: Some(local_name.to_string()),
        }
    }

    /// Creates a conditional selector.
    ///
    /// Conditions added to an already conditional selector are joined with
    /// the existing ones, so the result is never nested.
    pub fn conditional(simple: Selector, condition: Condition) -> Self {
        match simple {
            Selector::Conditional {
                simple,
                condition: prev,
            } => Selector::Conditional {
                simple,
                condition: Condition::And(Box::new(prev), Box::new(condition)),
            },
            simple => Selector::Conditional {
                simple: Box::new(simple),
                condition,
            },
        }
    }

    /// Returns the selector kind.
    pub fn selector_type(&self) -> SelectorType {
        match self {
            Selector::Element { .. } => SelectorType::Element,
            Selector::PseudoElement(_) => SelectorType::PseudoElement,
            Selector::Conditional { .. } => SelectorType::Conditional,
            Selector::Descendant { .. } => SelectorType::Descendant,
            Selector::Child { .. } => SelectorType::Child,
            Selector::DirectAdjacent { .. } => SelectorType::DirectAdjacent,
        }
    }

    /// Returns the selector specificity.
    ///
    /// Ids weigh `1 << 16`, other conditions `1 << 8`,
    /// element names and pseudo-elements `1`.
    pub fn specificity(&self) -> u32 {
        match self {
            Selector::Element { local_name, .. } => local_name.is_some() as u32,
            Selector::PseudoElement(_) => 1,
            Selector::Conditional { simple, condition } => {
                simple.specificity() + condition.specificity()
            }
            Selector::Descendant { ancestor: a, simple }
            | Selector::Child { parent: a, simple }
            | Selector::DirectAdjacent { sibling: a, simple } => {
                a.specificity() + simple.specificity()
            }
        }
    }

    /// Checks that the selector matches an element.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        match self {
            Selector::Element {
                namespace,
                local_name,
            } => {
                if let Some(ref name) = local_name {
                    if element.local_name() != name {
                        return false;
                    }
                }

                match namespace {
                    Some(ref ns) => element.namespace() == Some(ns.as_str()),
                    None => true,
                }
            }
            Selector::PseudoElement(_) => false,
            Selector::Conditional { simple, condition } => {
                simple.matches(element) && condition.matches(element)
            }
            Selector::Descendant { ancestor, simple } => {
                if !simple.matches(element) {
                    return false;
                }

                let mut parent = element.parent_element();
                while let Some(e) = parent {
                    if ancestor.matches(&e) {
                        return true;
                    }

                    parent = e.parent_element();
                }

                false
            }
            Selector::Child { parent, simple } => {
                simple.matches(element)
                    && element
                        .parent_element()
                        .map_or(false, |e| parent.matches(&e))
            }
            Selector::DirectAdjacent { sibling, simple } => {
                simple.matches(element)
                    && element
                        .prev_sibling_element()
                        .map_or(false, |e| sibling.matches(&e))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selector::Element { local_name, .. } => match local_name {
                Some(ref name) => write!(f, "{}", name),
                None => write!(f, "*"),
            },
            Selector::PseudoElement(ref name) => write!(f, ":{}", name),
            Selector::Conditional { simple, condition } => {
                // The universal selector is implied before a condition.
                match **simple {
                    Selector::Element {
                        local_name: None, ..
                    } => write!(f, "{}", condition),
                    _ => write!(f, "{}{}", simple, condition),
                }
            }
            Selector::Descendant { ancestor, simple } => match **simple {
                Selector::PseudoElement(_) => write!(f, "{}{}", ancestor, simple),
                _ => write!(f, "{} {}", ancestor, simple),
            },
            Selector::Child { parent, simple } => match **simple {
                Selector::PseudoElement(_) => write!(f, "{}{}", parent, simple),
                _ => write!(f, "{} > {}", parent, simple),
            },
            Selector::DirectAdjacent { sibling, simple } => {
                write!(f, "{} + {}", sibling, simple)
            }
        }
    }
}

/// A condition kind.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConditionType {
    Attribute,
    OneOfAttribute,
    BeginHyphenAttribute,
    Class,
    Id,
    Lang,
    PseudoClass,
    And,
}

/// A selector condition.
#[derive(Clone, PartialEq, Debug)]
pub enum Condition {
    /// `[name]` or `[name="value"]`
    Attribute {
        /// The attribute namespace URI.
        namespace: Option<String>,
        /// The attribute name.
        local_name: String,
        /// The expected value. `None` only checks that the attribute is present.
        value: Option<String>,
    },
    /// `[name~="value"]`
    OneOfAttribute {
        /// The attribute name.
        local_name: String,
        /// A word the attribute must contain.
        value: String,
    },
    /// `[name|="value"]`
    BeginHyphenAttribute {
        /// The attribute name.
        local_name: String,
        /// The expected value or prefix.
        value: String,
    },
    /// `.value`
    Class(String),
    /// `#value`
    Id(String),
    /// `:lang(value)`
    Lang(String),
    /// `:value`
    PseudoClass(String),
    /// Both conditions.
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Returns the condition kind.
    pub fn condition_type(&self) -> ConditionType {
        match self {
            Condition::Attribute { .. } => ConditionType::Attribute,
            Condition::OneOfAttribute { .. } => ConditionType::OneOfAttribute,
            Condition::BeginHyphenAttribute { .. } => ConditionType::BeginHyphenAttribute,
            Condition::Class(_) => ConditionType::Class,
            Condition::Id(_) => ConditionType::Id,
            Condition::Lang(_) => ConditionType::Lang,
            Condition::PseudoClass(_) => ConditionType::PseudoClass,
            Condition::And(..) => ConditionType::And,
        }
    }

    /// Returns the condition specificity.
    pub fn specificity(&self) -> u32 {
        match self {
            Condition::Id(_) => 1 << 16,
            Condition::And(a, b) => a.specificity() + b.specificity(),
            _ => 1 << 8,
        }
    }

    /// Checks that the condition holds for an element.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        match self {
            Condition::Attribute {
                local_name, value, ..
            } => match (element.attribute(local_name), value) {
                (Some(actual), Some(ref expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Condition::OneOfAttribute { local_name, value } => element
                .attribute(local_name)
                .map_or(false, |v| contains_word(v, value)),
            Condition::BeginHyphenAttribute { local_name, value } => element
                .attribute(local_name)
                .map_or(false, |v| starts_with_hyphenated(v, value)),
            Condition::Class(ref name) => element
                .attribute("class")
                .map_or(false, |v| contains_word(v, name)),
            Condition::Id(ref id) => element.attribute("id") == Some(id.as_str()),
            Condition::Lang(ref lang) => match_lang(element, lang),
            Condition::PseudoClass(ref class) => {
                if class.eq_ignore_ascii_case("first-child") {
                    element.prev_sibling_element().is_none()
                } else {
                    element.pseudo_class_matches(class)
                }
            }
            Condition::And(a, b) => a.matches(element) && b.matches(element),
        }
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split_ascii_whitespace().any(|w| w == word)
}

fn starts_with_hyphenated(text: &str, prefix: &str) -> bool {
    text == prefix
        || (text.len() > prefix.len()
            && text.starts_with(prefix)
            && text.as_bytes()[prefix.len()] == b'-')
}

// The language is inherited from the closest ancestor that sets it.
fn match_lang<E: Element>(element: &E, lang: &str) -> bool {
    let mut actual = element.lang().map(|s| s.to_ascii_lowercase());
    let mut parent = element.parent_element();
    while actual.is_none() {
        match parent {
            Some(e) => {
                actual = e.lang().map(|s| s.to_ascii_lowercase());
                parent = e.parent_element();
            }
            None => return false,
        }
    }

    match actual {
        Some(actual) => starts_with_hyphenated(&actual, &lang.to_ascii_lowercase()),
        None => false,
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::Attribute {
                local_name, value, ..
            } => match value {
                Some(ref value) => write!(f, "[{}=\"{}\"]", local_name, value),
                None => write!(f, "[{}]", local_name),
            },
            Condition::OneOfAttribute { local_name, value } => {
                write!(f, "[{}~=\"{}\"]", local_name, value)
            }
            Condition::BeginHyphenAttribute { local_name, value } => {
                write!(f, "[{}|=\"{}\"]", local_name, value)
            }
            Condition::Class(ref name) => write!(f, ".{}", name),
            Condition::Id(ref id) => write!(f, "#{}", id),
            Condition::Lang(ref lang) => write!(f, ":lang({})", lang),
            Condition::PseudoClass(ref class) => write!(f, ":{}", class),
            Condition::And(a, b) => write!(f, "{}{}", a, b),
        }
    }
}
