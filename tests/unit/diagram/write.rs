use crate::diagram::model::{Attr, AttrValue, Diagram};

#[test]
fn serialization_round_trips_through_the_parser() {
    let src = r##"<svg viewBox="0 0 10 10"><g><rect id="a" x="1.5" y="2" width="3" height="4" fill="#AABBCC" stroke="none"/><text>a &lt; b</text></g></svg>"##;
    let d = Diagram::parse(src).unwrap();
    let svg = d.to_svg();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 10 10\">"));
    assert!(svg.contains("fill=\"#aabbcc\""), "{svg}");
    assert!(svg.contains("x=\"1.5\""), "{svg}");
    assert!(svg.contains("a &lt; b"), "{svg}");

    let again = Diagram::parse(&svg).unwrap();
    assert_eq!(again, d);
}

#[test]
fn writes_mutated_values() {
    let mut d = Diagram::parse(r#"<svg><circle id="c" r="1"/></svg>"#).unwrap();
    let addr = d.identity_index()["c"].clone();
    d.element_mut(&addr)
        .unwrap()
        .set(Attr::R, AttrValue::Number(2.25));
    assert_eq!(
        d.to_svg(),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle id="c" r="2.25"/></svg>"#
    );
}

#[test]
fn escapes_attribute_quotes() {
    let d = Diagram::parse(r#"<svg><text font-family='"Fira" &amp; co'>x</text></svg>"#).unwrap();
    assert!(d.to_svg().contains(r#"font-family="&quot;Fira&quot; &amp; co""#));
}
