// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::managers::ComputeContext;
use crate::registry::{COLOR_INDEX, FONT_SIZE_INDEX};
use crate::selector::Element;
use crate::style_map::flags;
use crate::stylesheet::{Declaration, StyleSheet};
use crate::{Options, Origin, Registry, StyleMap};

/// The built-in SVG style sheet.
pub const USER_AGENT_STYLE_SHEET: &str = "\
svg, symbol, image, marker, pattern, foreignObject { overflow: hidden }
";

// Relative flags that stay meaningful once a value is copied from the parent.
const INHERITABLE_FLAGS: u16 = flags::FONT_SIZE_RELATIVE
    | flags::COLOR_RELATIVE
    | flags::BLOCK_WIDTH_RELATIVE
    | flags::BLOCK_HEIGHT_RELATIVE;

/// A cascade engine.
///
/// Holds the property registry and all style sheets,
/// resolves declarations into cascaded styles and cascaded styles into computed ones.
pub struct CssEngine {
    registry: Registry,
    options: Options,
    user_agent: StyleSheet,
    user: StyleSheet,
    author: Vec<StyleSheet>,
}

impl CssEngine {
    /// Creates an engine with the SVG property set.
    pub fn new(options: Options) -> Self {
        Self::with_registry(Registry::new(), options)
    }

    /// Creates an engine with a custom property set.
    ///
    /// The registry must keep `font-size` and `color` at their fixed indices.
    pub fn with_registry(registry: Registry, options: Options) -> Self {
        let user_agent = StyleSheet::parse(USER_AGENT_STYLE_SHEET, Origin::UserAgent, &registry);
        let user = match options.user_style_sheet {
            Some(ref text) => StyleSheet::parse(text, Origin::User, &registry),
            None => StyleSheet::new(Origin::User),
        };

        CssEngine {
            registry,
            options,
            user_agent,
            user,
            author: Vec::new(),
        }
    }

    /// Returns the property registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns processing options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parses and appends an author style sheet.
    pub fn add_author_style_sheet(&mut self, text: &str) {
        let sheet = StyleSheet::parse(text, Origin::Author, &self.registry);
        log::debug!("Author style sheet with {} rules added.", sheet.len());
        self.author.push(sheet);
    }

    /// Returns author style sheets in document order.
    pub fn author_style_sheets(&self) -> &[StyleSheet] {
        &self.author
    }

    /// Resolves which declaration applies to each property of an element.
    ///
    /// `presentation` holds declarations made from SVG presentation attributes
    /// and `inline` the ones from the `style` attribute.
    ///
    /// The resulting map is not computed: values are exactly as specified
    /// and properties without declarations are `None`.
    pub fn cascade<E: Element>(
        &self,
        element: &E,
        presentation: &[Declaration],
        inline: &[Declaration],
    ) -> StyleMap {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut order = 0;

        let sheets = std::iter::once(&self.user_agent)
            .chain(std::iter::once(&self.user))
            .chain(self.author.iter());
        for sheet in sheets {
            for (_, rule) in sheet.matching_rules(element) {
                let specificity = rule.selector.specificity();
                for d in &rule.declarations {
                    candidates.push(Candidate::new(d, sheet.origin(), specificity, order));
                    order += 1;
                }
            }
        }

        for d in presentation {
            candidates.push(Candidate::new(d, Origin::PresentationAttribute, 0, order));
            order += 1;
        }

        for d in inline {
            candidates.push(Candidate::new(d, Origin::InlineStyle, 0, order));
            order += 1;
        }

        candidates.sort_by_key(|c| (c.rank(), c.specificity, c.order));

        let mut map = StyleMap::new(self.registry.len());
        for c in candidates {
            let idx = c.declaration.index;
            if idx >= map.len() {
                log::warn!("Declaration with an unknown property index {} skipped.", idx);
                continue;
            }

            map.put_value(idx, c.declaration.value.clone());
            map.put_mask(idx, 0);
            map.put_important(idx, c.is_important());
            map.put_origin(idx, c.origin);
        }

        map
    }

    /// Resolves a cascaded style into a computed one.
    ///
    /// `parent` is the computed style of the parent element, `None` for the root.
    /// Every property of the result has a value.
    pub fn compute(&self, cascaded: &StyleMap, parent: Option<&StyleMap>) -> StyleMap {
        let len = self.registry.len();
        let mut map = StyleMap::new(len);
        let mut ctx = ComputeContext::new(&self.options, parent, FONT_SIZE_INDEX);

        let order = [FONT_SIZE_INDEX, COLOR_INDEX]
            .into_iter()
            .chain((0..len).filter(|idx| *idx != FONT_SIZE_INDEX && *idx != COLOR_INDEX));
        for idx in order {
            let manager = match self.registry.manager(idx) {
                Some(v) => v,
                None => continue,
            };

            let specified = cascaded.value(idx);
            let mut mask = cascaded.mask(idx);

            let inherit = match specified {
                Some(v) => v.is_inherit(),
                None => manager.is_inherited(),
            };

            let inherited = if inherit {
                parent.and_then(|p| p.value(idx).map(|v| (v, p.mask(idx))))
            } else {
                None
            };

            let value = match (specified, inherited) {
                (_, Some((value, parent_mask))) => {
                    mask |= flags::INHERITED | (parent_mask & INHERITABLE_FLAGS);
                    value.clone()
                }
                (Some(value), None) if !value.is_inherit() => {
                    let value = manager.compute_value(value, &mut ctx);
                    mask |= ctx.take_flags();
                    value
                }
                (specified, None) => {
                    if specified.is_none() {
                        mask |= flags::NULL_CASCADED;
                    }

                    let value = manager.compute_default_value(&mut ctx);
                    mask |= ctx.take_flags();
                    value
                }
            };

            if idx == FONT_SIZE_INDEX {
                if let Some(size) = value.as_float() {
                    ctx.set_font_size(size);
                }
            } else if idx == COLOR_INDEX {
                ctx.set_color(value.clone());
            }

            map.put_value(idx, value);
            map.put_mask(idx, mask | flags::COMPUTED);
        }

        map
    }

    /// Cascades and computes an element style in one go.
    pub fn computed_style<E: Element>(
        &self,
        element: &E,
        presentation: &[Declaration],
        inline: &[Declaration],
        parent: Option<&StyleMap>,
    ) -> StyleMap {
        let cascaded = self.cascade(element, presentation, inline);
        self.compute(&cascaded, parent)
    }
}

impl std::fmt::Debug for CssEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CssEngine")
            .field("options", &self.options)
            .field("user_rules", &self.user.len())
            .field("author_style_sheets", &self.author.len())
            .finish_non_exhaustive()
    }
}

struct Candidate<'a> {
    declaration: &'a Declaration,
    origin: Origin,
    specificity: u32,
    order: usize,
}

impl<'a> Candidate<'a> {
    fn new(declaration: &'a Declaration, origin: Origin, specificity: u32, order: usize) -> Self {
        Candidate {
            declaration,
            origin,
            specificity,
            order,
        }
    }

    fn is_important(&self) -> bool {
        self.declaration.important && self.origin != Origin::UserAgent
    }

    // Cascade precedence, from the weakest.
    fn rank(&self) -> u8 {
        match (self.origin, self.is_important()) {
            (Origin::UserAgent, _) => 0,
            (Origin::User, false) => 1,
            (Origin::PresentationAttribute, false) => 2,
            (Origin::Author, false) => 3,
            (Origin::InlineStyle, false) => 4,
            // Presentation attributes have no `!important`.
            (Origin::PresentationAttribute, true) => 2,
            (Origin::Author, true) => 5,
            (Origin::InlineStyle, true) => 6,
            (Origin::User, true) => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::parse_declarations;

    #[derive(Clone, Copy)]
    struct Node<'a> {
        name: &'a str,
        class: Option<&'a str>,
        parent: Option<&'a Node<'a>>,
    }

    impl<'a> Element for Node<'a> {
        fn parent_element(&self) -> Option<Self> {
            self.parent.copied()
        }

        fn prev_sibling_element(&self) -> Option<Self> {
            None
        }

        fn local_name(&self) -> &str {
            self.name
        }

        fn namespace(&self) -> Option<&str> {
            None
        }

        fn attribute(&self, local_name: &str) -> Option<&str> {
            match local_name {
                "class" => self.class,
                _ => None,
            }
        }

        fn lang(&self) -> Option<&str> {
            None
        }
    }

    fn engine(css: &str) -> CssEngine {
        let mut engine = CssEngine::new(Options::default());
        engine.add_author_style_sheet(css);
        engine
    }

    fn text(engine: &CssEngine, map: &StyleMap, name: &str) -> String {
        let idx = engine.registry().index_of(name).unwrap();
        map.value(idx).map(|v| v.css_text()).unwrap_or_default()
    }

    #[test]
    fn specificity_and_order() {
        let e = engine("rect.a { fill: red } rect { fill: blue } .a { fill: green } rect { stroke: red } rect { stroke: blue }");
        let node = Node { name: "rect", class: Some("a"), parent: None };
        let map = e.cascade(&node, &[], &[]);
        assert_eq!(text(&e, &map, "fill"), "rgb(255, 0, 0)");
        assert_eq!(text(&e, &map, "stroke"), "rgb(0, 0, 255)");
        assert_eq!(map.origin(e.registry().index_of("fill").unwrap()), Origin::Author);
    }

    #[test]
    fn origins() {
        let e = engine("rect { fill: red; stroke: red !important; opacity: 0.5 }");
        let node = Node { name: "rect", class: None, parent: None };
        let reg = e.registry();
        let pres = parse_declarations("fill: blue; stroke: blue; stroke-width: 2", reg);
        let inline = parse_declarations("stroke: green; opacity: 0.2", reg);
        let map = e.cascade(&node, &pres, &inline);
        assert_eq!(text(&e, &map, "fill"), "rgb(255, 0, 0)");
        assert_eq!(text(&e, &map, "stroke"), "rgb(255, 0, 0)");
        assert!(map.is_important(reg.index_of("stroke").unwrap()));
        assert_eq!(text(&e, &map, "opacity"), "0.2");
        assert_eq!(text(&e, &map, "stroke-width"), "2");
        let idx = reg.index_of("stroke-width").unwrap();
        assert_eq!(map.origin(idx), Origin::PresentationAttribute);
    }

    #[test]
    fn user_important_wins() {
        let opt = Options {
            user_style_sheet: Some("rect { fill: red !important; stroke: red }".to_string()),
            ..Options::default()
        };
        let mut e = CssEngine::new(opt);
        e.add_author_style_sheet("rect { fill: blue !important; stroke: blue }");
        let node = Node { name: "rect", class: None, parent: None };
        let map = e.cascade(&node, &[], &[]);
        assert_eq!(text(&e, &map, "fill"), "rgb(255, 0, 0)");
        assert_eq!(text(&e, &map, "stroke"), "rgb(0, 0, 255)");
        assert_eq!(map.origin(e.registry().index_of("fill").unwrap()), Origin::User);
    }

    #[test]
    fn user_agent_style_sheet() {
        let e = engine("");
        let node = Node { name: "svg", class: None, parent: None };
        let map = e.computed_style(&node, &[], &[], None);
        let idx = e.registry().index_of("overflow").unwrap();
        assert_eq!(text(&e, &map, "overflow"), "hidden");
        assert_eq!(map.origin(idx), Origin::UserAgent);
        assert!(!map.is_null_cascaded(idx));
    }

    #[test]
    fn compute_defaults_and_inheritance() {
        let e = engine("g { fill: blue; font-size: 20px; opacity: 0.5 } rect { stroke-width: 2em }");
        let root = Node { name: "g", class: None, parent: None };
        let root_map = e.computed_style(&root, &[], &[], None);
        assert!(root_map.is_computed(FONT_SIZE_INDEX));
        let stroke = e.registry().index_of("stroke").unwrap();
        assert!(root_map.is_null_cascaded(stroke));
        assert_eq!(text(&e, &root_map, "stroke"), "none");

        let child = Node { name: "rect", class: None, parent: Some(&root) };
        let map = e.computed_style(&child, &[], &[], Some(&root_map));
        let fill = e.registry().index_of("fill").unwrap();
        assert_eq!(text(&e, &map, "fill"), "rgb(0, 0, 255)");
        assert!(map.is_inherited(fill));
        assert_eq!(text(&e, &map, "opacity"), "1");
        assert_eq!(text(&e, &map, "font-size"), "20");
        assert_eq!(text(&e, &map, "stroke-width"), "40");
        assert!(map.is_font_size_relative(e.registry().index_of("stroke-width").unwrap()));
    }

    #[test]
    fn explicit_inherit() {
        let e = engine("g { opacity: 0.5 } rect { opacity: inherit; color: inherit }");
        let root = Node { name: "g", class: None, parent: None };
        let root_map = e.computed_style(&root, &[], &[], None);
        let child = Node { name: "rect", class: None, parent: Some(&root) };
        let map = e.computed_style(&child, &[], &[], Some(&root_map));
        assert_eq!(text(&e, &map, "opacity"), "0.5");
        assert!(map.is_inherited(e.registry().index_of("opacity").unwrap()));

        // `inherit` on the root falls back to the default.
        let orphan = Node { name: "rect", class: None, parent: None };
        let map = e.computed_style(&orphan, &[], &[], None);
        assert_eq!(text(&e, &map, "opacity"), "1");
        assert_eq!(text(&e, &map, "color"), "rgb(0, 0, 0)");
    }

    #[test]
    fn current_color() {
        let e = engine("g { color: red } rect { fill: currentColor }");
        let root = Node { name: "g", class: None, parent: None };
        let root_map = e.computed_style(&root, &[], &[], None);
        let child = Node { name: "rect", class: None, parent: Some(&root) };
        let map = e.computed_style(&child, &[], &[], Some(&root_map));
        let fill = e.registry().index_of("fill").unwrap();
        assert_eq!(text(&e, &map, "fill"), "rgb(255, 0, 0)");
        assert!(map.is_color_relative(fill));
    }
}
