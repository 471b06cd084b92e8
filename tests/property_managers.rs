use svgcss::{Registry, Value};

fn check(name: &str, inherited: bool, default: &str, keywords: &str) {
    let reg = Registry::new();
    let manager = reg.manager_by_name(name).unwrap();
    assert_eq!(manager.property_name(), name);
    assert_eq!(manager.is_inherited(), inherited, "{} inheritance", name);

    if !default.is_empty() {
        assert_eq!(manager.default_value().css_text(), default, "{} default", name);
    }

    let (_, value) = reg.parse_value(name, "inherit").unwrap();
    assert_eq!(value, Value::Inherit);

    for keyword in keywords.split('|').map(str::trim).filter(|s| !s.is_empty()) {
        let (_, value) = reg.parse_value(name, keyword).unwrap();
        assert_eq!(value.css_text(), keyword, "{}: {}", name, keyword);
    }
}

macro_rules! test {
    ($fn_name:ident, $name:expr, $inherited:expr, $default:expr, $keywords:expr) => {
        #[test]
        fn $fn_name() {
            check($name, $inherited, $default, $keywords);
        }
    };
}

#[rustfmt::skip]
mod keywords {
    use super::check;

    test!(alignment_baseline, "alignment-baseline", false, "auto",
          "auto|baseline|before-edge|text-before-edge|middle|after-edge|text-after-edge|ideographic|alphabetic|hanging|mathematical");
    test!(baseline_shift, "baseline-shift", false, "baseline", "baseline|sub|super");
    test!(clip, "clip", false, "auto", "auto");
    test!(clip_path, "clip-path", false, "none", "none");
    test!(clip_rule, "clip-rule", true, "nonzero", "nonzero|evenodd");
    test!(color, "color", true, "rgb(0, 0, 0)", "");
    test!(color_interpolation, "color-interpolation", true, "sRGB", "auto|sRGB|linearRGB");
    test!(color_interpolation_filters, "color-interpolation-filters", true, "linearRGB", "auto|sRGB|linearRGB");
    test!(color_profile, "color-profile", true, "auto", "auto|sRGB");
    test!(color_rendering, "color-rendering", true, "auto", "auto|optimizeSpeed|optimizeQuality");
    test!(cursor, "cursor", true, "auto",
          "auto|crosshair|default|pointer|move|e-resize|ne-resize|nw-resize|n-resize|se-resize|sw-resize|s-resize|w-resize| text|wait|help ");
    test!(direction, "direction", true, "ltr", "ltr|rtl");
    test!(display, "display", false, "inline",
          "inline|block|list-item|run-in|compact|marker|table|inline-table|table-row-group|table-header-group|table-footer-group|table-row|table-column-group|table-column|table-cell|table-caption|none");
    test!(dominant_baseline, "dominant-baseline", false, "auto",
          "auto|use-script|no-change|reset-size|alphabetic|hanging|ideographic|mathematical|central|middle|text-after-edge|text-before-edge|text-top|text-bottom");
    test!(enable_background, "enable-background", false, "accumulate", "accumulate");
    test!(fill, "fill", true, "rgb(0, 0, 0)", "none|currentColor");
    test!(fill_opacity, "fill-opacity", true, "1", "");
    test!(fill_rule, "fill-rule", true, "nonzero", "nonzero|evenodd");
    test!(filter, "filter", false, "none", "none");
    test!(flood_color, "flood-color", false, "rgb(0, 0, 0)", "currentColor");
    test!(flood_opacity, "flood-opacity", false, "1", "");
    test!(font_family, "font-family", true, "", "serif|sans-serif|cursive|fantasy|monospace");
    test!(font_size, "font-size", true, "medium", "medium|xx-small|x-small|small|large|x-large|xx-large|smaller|larger");
    test!(font_size_adjust, "font-size-adjust", true, "none", "none");
    test!(font_stretch, "font-stretch", true, "normal",
          "normal|wider|narrower|ultra-condensed|extra-condensed|condensed|semi-condensed|semi-expanded|expanded|extra-expanded|ultra-expanded");
    test!(font_style, "font-style", true, "normal", "normal|italic|oblique");
    test!(font_variant, "font-variant", true, "normal", "normal|small-caps");
    test!(font_weight, "font-weight", true, "normal", "normal|bold|bolder|lighter|100|200|300|400|500|600|700|800|900");
    test!(glyph_orientation_horizontal, "glyph-orientation-horizontal", true, "0deg", "");
    test!(glyph_orientation_vertical, "glyph-orientation-vertical", true, "auto", "auto");
    test!(image_rendering, "image-rendering", true, "auto", "auto|optimizeSpeed|optimizeQuality");
    test!(kerning, "kerning", true, "auto", "auto");
    test!(letter_spacing, "letter-spacing", true, "normal", "normal");
    test!(lighting_color, "lighting-color", false, "rgb(255, 255, 255)", "currentColor");
    test!(marker_start, "marker-start", true, "none", "none");
    test!(marker_mid, "marker-mid", true, "none", "none");
    test!(marker_end, "marker-end", true, "none", "none");
    test!(mask, "mask", false, "none", "none");
    test!(opacity, "opacity", false, "1", "");
    test!(overflow, "overflow", false, "visible", "visible|hidden|scroll|auto");
    test!(pointer_events, "pointer-events", true, "visiblePainted",
          "visiblePainted|visibleFill|visibleStroke|visible|painted|fill|stroke|all|none");
    test!(shape_rendering, "shape-rendering", true, "auto", "auto|optimizeSpeed|crispEdges|geometricPrecision");
    test!(stop_color, "stop-color", false, "rgb(0, 0, 0)", "");
    test!(stop_opacity, "stop-opacity", false, "1", "");
    test!(stroke, "stroke", true, "none", "none");
    test!(stroke_dasharray, "stroke-dasharray", true, "none", "none");
    test!(stroke_dashoffset, "stroke-dashoffset", true, "0", "0");
    test!(stroke_linecap, "stroke-linecap", true, "butt", "butt|round|square");
    test!(stroke_linejoin, "stroke-linejoin", true, "miter", "miter|round|bevel");
    test!(stroke_miterlimit, "stroke-miterlimit", true, "4", "");
    test!(stroke_opacity, "stroke-opacity", true, "1", "");
    test!(stroke_width, "stroke-width", true, "1", "");
    test!(text_anchor, "text-anchor", true, "start", "start|middle|end");
    test!(text_decoration, "text-decoration", false, "none", "none|underline|overline|line-through|blink");
    test!(text_rendering, "text-rendering", true, "auto", "auto|optimizeSpeed|optimizeLegibility|geometricPrecision");
    test!(unicode_bidi, "unicode-bidi", false, "normal", "normal|embed|bidi-override");
    test!(visibility, "visibility", true, "visible", "visible|hidden|collapse");
    test!(word_spacing, "word-spacing", true, "normal", "normal");
    test!(writing_mode, "writing-mode", true, "lr-tb", "lr-tb|rl-tb|tb-rl|lr|rl|tb");
}

#[test]
fn keywords_ignore_case() {
    let reg = Registry::new();
    let (_, value) = reg.parse_value("stroke-linejoin", "ROUND").unwrap();
    assert_eq!(value.css_text(), "round");
    let (_, value) = reg.parse_value("color-interpolation", "linearrgb").unwrap();
    assert_eq!(value.css_text(), "linearRGB");
}

#[test]
fn invalid_keywords() {
    let reg = Registry::new();
    assert!(reg.parse_value("stroke-linecap", "bevel").is_err());
    assert!(reg.parse_value("display", "flex").is_err());
    assert!(reg.parse_value("visibility", "visible hidden").is_err());
    assert!(reg.parse_value("opacity", "auto").is_err());
}
