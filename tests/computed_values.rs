use svgcss::{Options, StyledDocument};

fn computed(attrs: &str, name: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' font-size='20'><g {}/></svg>",
        attrs
    );

    let opt = Options {
        viewport_size: (200.0, 100.0),
        ..Options::default()
    };

    let doc = StyledDocument::parse(&svg, opt).unwrap();
    let g = doc.xml().root_element().first_element_child().unwrap();
    doc.property_value(g, name).unwrap().css_text()
}

macro_rules! test {
    ($fn_name:ident, $attrs:expr, $name:expr, $result:expr) => {
        #[test]
        fn $fn_name() {
            assert_eq!(computed($attrs, $name), $result);
        }
    };
}

#[rustfmt::skip]
mod values {
    use super::computed;

    test!(pixels, "stroke-width='12px'", "stroke-width", "12");
    test!(font_relative_length, "stroke-dashoffset='0.5em'", "stroke-dashoffset", "10");
    test!(ex_length, "stroke-width='1ex'", "stroke-width", "10");
    test!(font_size_em, "font-size='2em'", "font-size", "40");
    test!(font_size_inherited, "", "font-size", "20");
    test!(dasharray, "stroke-dasharray='5px 2em'", "stroke-dasharray", "5, 40");
    test!(horizontal_percentage, "letter-spacing='10%'", "letter-spacing", "20");
    test!(baseline_shift_percentage, "baseline-shift='50%'", "baseline-shift", "10");
    test!(negative_length, "stroke-width='-2'", "stroke-width", "-2");
    test!(negative_percentage, "letter-spacing='-10%'", "letter-spacing", "-20");
    test!(baseline_shift_keyword, "baseline-shift='super'", "baseline-shift", "super");
    test!(clip, "clip='rect(10%, auto, 2em, 10%)'", "clip", "rect(10, auto, 40, 20)");
    test!(enable_background, "enable-background='new 0 0 10% 10%'", "enable-background", "new 0 0 20 10");
    test!(glyph_orientation, "glyph-orientation-horizontal='200grad'", "glyph-orientation-horizontal", "180deg");
    test!(rgb_percentages, "fill='rgb(100%, 0%, 50%)'", "fill", "rgb(255, 0, 127.5)");
    test!(icc_fallback, "fill='#f00 icc-color(p, 0.5)'", "fill", "rgb(255, 0, 0) icc-color(p, 0.5)");
    test!(cursor, "cursor='url(a.cur), url(b.cur), pointer'", "cursor", "url(a.cur), url(b.cur), pointer");
    test!(text_decoration, "text-decoration='underline blink'", "text-decoration", "underline blink");
}

#[test]
fn relative_flags() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g stroke-width='10%' stroke-dashoffset='1em' font-size='2em' fill='currentColor'/>
    </svg>
    ";

    let doc = StyledDocument::parse(svg, Options::default()).unwrap();
    let g = doc.xml().root_element().first_element_child().unwrap();
    let style = doc.computed_style(g).unwrap();
    let reg = doc.engine().registry();
    let idx = |name: &str| reg.index_of(name).unwrap();

    assert!(style.is_block_width_relative(idx("stroke-width")));
    assert!(style.is_block_height_relative(idx("stroke-width")));
    assert!(style.is_font_size_relative(idx("stroke-dashoffset")));
    assert!(style.is_parent_relative(idx("font-size")));
    assert!(style.is_color_relative(idx("fill")));
    assert!(style.is_computed(idx("fill")));
    assert!(!style.is_font_size_relative(idx("fill")));
}
