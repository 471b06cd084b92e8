// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use csslex::Stream;
use once_cell::sync::OnceCell;

use crate::selector::Element;
use crate::stylesheet::{parse_declarations, Declaration};
use crate::{CssEngine, Error, Options, StyleMap, Value};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A roxmltree element as a selector matching target.
#[derive(Clone, Copy, Debug)]
pub struct XmlElement<'a, 'input: 'a>(pub roxmltree::Node<'a, 'input>);

impl<'a, 'input: 'a> Element for XmlElement<'a, 'input> {
    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(XmlElement)
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.0.prev_sibling_element().map(XmlElement)
    }

    fn local_name(&self) -> &str {
        self.0.tag_name().name()
    }

    fn namespace(&self) -> Option<&str> {
        self.0.tag_name().namespace()
    }

    fn attribute(&self, local_name: &str) -> Option<&str> {
        self.0.attribute(local_name)
    }

    fn lang(&self) -> Option<&str> {
        self.0
            .attribute((XML_NAMESPACE, "lang"))
            .or_else(|| self.0.attribute("lang"))
    }
}

/// An XML document with lazily computed element styles.
///
/// Each element style is computed at most once, on the first request,
/// so a document can be shared between threads.
pub struct StyledDocument<'input> {
    xml: roxmltree::Document<'input>,
    engine: CssEngine,
    indices: HashMap<roxmltree::NodeId, usize>,
    styles: Vec<OnceCell<StyleMap>>,
}

impl<'input> StyledDocument<'input> {
    /// Parses an XML document and collects its style sheets.
    pub fn parse(text: &'input str, options: Options) -> Result<Self, Error> {
        let opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opt)?;
        Ok(Self::from_document(xml, options))
    }

    /// Wraps a parsed XML document.
    pub fn from_document(xml: roxmltree::Document<'input>, options: Options) -> Self {
        let mut engine = CssEngine::new(options);
        collect_style_sheets(&xml, &mut engine);

        let mut indices = HashMap::new();
        for node in xml.descendants().filter(|n| n.is_element()) {
            let idx = indices.len();
            indices.insert(node.id(), idx);
        }

        let styles = (0..indices.len()).map(|_| OnceCell::new()).collect();

        StyledDocument {
            xml,
            engine,
            indices,
            styles,
        }
    }

    /// Returns the underlying XML document.
    pub fn xml(&self) -> &roxmltree::Document<'input> {
        &self.xml
    }

    /// Returns the cascade engine.
    pub fn engine(&self) -> &CssEngine {
        &self.engine
    }

    /// Returns the computed style of an element.
    ///
    /// Returns `None` when the node is not an element of this document.
    pub fn computed_style<'a>(&'a self, node: roxmltree::Node<'a, 'input>) -> Option<&'a StyleMap> {
        if !std::ptr::eq(node.document(), &self.xml) {
            return None;
        }

        let idx = *self.indices.get(&node.id())?;
        if let Some(style) = self.styles[idx].get() {
            return Some(style);
        }

        let parent = match node.parent_element() {
            Some(parent) => Some(self.computed_style(parent)?),
            None => None,
        };

        Some(self.styles[idx].get_or_init(|| {
            log::debug!("Computing the '{}' element style.", node.tag_name().name());
            let (presentation, inline) = self.element_declarations(node);
            self.engine
                .computed_style(&XmlElement(node), &presentation, &inline, parent)
        }))
    }

    /// Returns the cascaded style of an element.
    ///
    /// Values are as specified. Properties without declarations are `None`.
    pub fn cascaded_style(&self, node: roxmltree::Node<'_, 'input>) -> Option<StyleMap> {
        if !node.is_element() || !std::ptr::eq(node.document(), &self.xml) {
            return None;
        }

        let (presentation, inline) = self.element_declarations(node);
        Some(self.engine.cascade(&XmlElement(node), &presentation, &inline))
    }

    /// Returns a computed property value of an element.
    pub fn property_value<'a>(
        &'a self,
        node: roxmltree::Node<'a, 'input>,
        name: &str,
    ) -> Option<&'a Value> {
        let idx = self.engine.registry().index_of(name)?;
        self.computed_style(node)?.value(idx)
    }

    // Presentation attributes and the `style` attribute declarations.
    fn element_declarations(
        &self,
        node: roxmltree::Node,
    ) -> (Vec<Declaration>, Vec<Declaration>) {
        let registry = self.engine.registry();

        let mut presentation = Vec::new();
        for attr in node.attributes() {
            if attr.namespace().is_some() || attr.name() == "style" {
                continue;
            }

            if let Some(index) = registry.index_of(attr.name()) {
                match registry.parse_value(attr.name(), attr.value()) {
                    Ok((_, value)) => presentation.push(Declaration {
                        index,
                        value,
                        important: false,
                    }),
                    Err(e) => {
                        log::warn!(
                            "Failed to parse {} value: '{}' cause {}.",
                            attr.name(),
                            attr.value(),
                            e
                        );
                    }
                }
            }
        }

        let inline = match node.attribute("style") {
            Some(value) => parse_declarations(value, registry),
            None => Vec::new(),
        };

        (presentation, inline)
    }
}

impl std::fmt::Debug for StyledDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyledDocument")
            .field("engine", &self.engine)
            .field("elements", &self.styles.len())
            .finish()
    }
}

// `<style>` elements and `xml-stylesheet` instructions, in document order.
fn collect_style_sheets(xml: &roxmltree::Document, engine: &mut CssEngine) {
    for node in xml.descendants() {
        if let Some(pi) = node.pi() {
            if pi.target != "xml-stylesheet" {
                continue;
            }

            let href = match pi.value.and_then(style_sheet_href) {
                Some(v) => v,
                None => continue,
            };

            let text = match engine.options().style_sheet_resolver {
                Some(ref resolve) => resolve(&href),
                None => {
                    log::warn!("Style sheet '{}' ignored, no resolver set.", href);
                    continue;
                }
            };

            match text {
                Some(text) => engine.add_author_style_sheet(&text),
                None => log::warn!("Failed to load the '{}' style sheet.", href),
            }
        } else if node.has_tag_name((SVG_NAMESPACE, "style")) {
            match node.attribute("type") {
                Some("text/css") => {}
                Some(_) => continue,
                None => {}
            }

            let text = match node.text() {
                Some(v) => v,
                None => continue,
            };

            engine.add_author_style_sheet(text);
        }
    }
}

// Returns the `href` of a CSS `xml-stylesheet` that isn't an alternate one.
fn style_sheet_href(text: &str) -> Option<String> {
    let mut href = None;
    for (name, value) in parse_pseudo_attributes(text) {
        match name {
            "href" => href = Some(value),
            "type" if value != "text/css" => return None,
            "alternate" if value == "yes" => return None,
            _ => {}
        }
    }

    href
}

// Parses `name="value"` pairs. Stops at the first malformed one.
fn parse_pseudo_attributes(text: &str) -> Vec<(&str, String)> {
    let mut s = Stream::from(text);
    let mut list = Vec::new();
    loop {
        s.skip_spaces();
        if s.at_end() {
            break;
        }

        let name = s.consume_bytes(|_, c| c != b'=' && !c.is_ascii_whitespace());
        s.skip_spaces();
        if s.consume_byte(b'=').is_err() {
            break;
        }

        s.skip_spaces();
        match s.parse_quoted_string() {
            Ok(value) => list.push((name, value)),
            Err(_) => break,
        }
    }

    list
}
