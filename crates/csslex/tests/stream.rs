use csslex::{Error, LexicalUnit, LexicalUnitType, Stream, Unit};

#[test]
fn idents_and_strings() {
    let mut s = Stream::from("-font-x 'a\\'b' \"c\"");
    assert!(s.is_ident_start());
    assert_eq!(s.parse_ident().unwrap(), "-font-x");
    s.skip_spaces();
    assert_eq!(s.parse_quoted_string().unwrap(), "a'b");
    s.skip_spaces();
    assert_eq!(s.parse_quoted_string().unwrap(), "c");
    assert!(s.at_end());
}

#[test]
fn invalid_ident() {
    let mut s = Stream::from("1a");
    assert!(!s.is_ident_start());
    assert_eq!(s.parse_ident(), Err(Error::InvalidIdent));
    assert_eq!(s.consume_name(), "1a");
}

#[test]
fn comments() {
    let mut s = Stream::from("  /* a */ /* b */x");
    s.skip_spaces_and_comments();
    assert_eq!(s.slice_tail(), "x");

    let mut s = Stream::from("/* never closed");
    s.skip_spaces_and_comments();
    assert!(s.at_end());
}

#[test]
fn char_positions() {
    let mut s = Stream::from("ÄÖ,x");
    s.advance(4);
    assert_eq!(s.calc_char_pos(), 3);
    let err = s.consume_byte(b';').unwrap_err();
    assert_eq!(err.to_string(), "expected ';' not ',' at position 3");
    assert_eq!(err.position(), Some(3));
    assert_eq!(Error::InvalidValue.position(), None);
}

#[test]
fn unit_accessors() {
    let units = csslex::parse_property_value("12 1.5 3em Serif 'a' url(b)").unwrap();
    let types: Vec<_> = units.iter().map(|u| u.unit_type()).collect();
    assert_eq!(
        types,
        vec![
            LexicalUnitType::Integer,
            LexicalUnitType::Real,
            LexicalUnitType::Dimension,
            LexicalUnitType::Ident,
            LexicalUnitType::String,
            LexicalUnitType::Uri,
        ]
    );

    assert_eq!(units[0].float_value(), Some(12.0));
    assert_eq!(units[2].float_value(), Some(3.0));
    assert_eq!(units[2], LexicalUnit::Dimension(3.0, Unit::Em));
    assert!(units[3].is_ident("serif"));
    assert_eq!(units[4].string_value(), Some("a"));
    assert_eq!(units[5].string_value(), Some("b"));
    assert_eq!(units[5].float_value(), None);
}

#[test]
fn unknown_dimension() {
    let units = csslex::parse_property_value("2vw").unwrap();
    assert_eq!(units, vec![LexicalUnit::Dimension(2.0, Unit::Other("vw".to_string()))]);
}
