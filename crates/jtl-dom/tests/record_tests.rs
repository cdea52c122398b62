//! Tests for element records: ordering, coercion and JSON form.

use jtl_dom::{AttrValue, ElementRecord, keys};

#[test]
fn test_set_keeps_insertion_order() {
    let mut record = ElementRecord::with_tag("p");
    let _ = record.set(keys::ID, "a");
    let _ = record.set(keys::CONTENTS, "hello");
    let previous = record.set(keys::ID, "b");

    assert_eq!(previous, Some(AttrValue::from("a")));
    let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(names, [keys::KEY, keys::ID, keys::CONTENTS]);
    assert_eq!(record.id(), Some("b"));
}

#[test]
fn test_display_coercion() {
    assert_eq!(AttrValue::Number(3.0).to_string(), "3");
    assert_eq!(AttrValue::Number(2.5).to_string(), "2.5");
    assert_eq!(AttrValue::Bool(true).to_string(), "true");
    assert_eq!(AttrValue::from("x").to_string(), "x");
}

#[test]
fn test_children_accessor() {
    let record = ElementRecord::with_tag("div").with(
        keys::CHILDREN,
        vec![ElementRecord::with_tag("p").with(keys::CONTENTS, "x")],
    );
    assert_eq!(record.children().len(), 1);
    assert_eq!(record.children()[0].contents(), "x");

    let not_a_list = ElementRecord::with_tag("div").with(keys::CHILDREN, "oops");
    assert!(not_a_list.children().is_empty());
}

#[test]
fn test_json_preserves_order_and_nesting() {
    let json = r#"{
        "KEY": "div",
        "style": "color:255,0,0,255",
        "children": [{"KEY": "p", "Contents": "x"}],
        "visible": true,
        "order": 2
    }"#;

    let record: ElementRecord = serde_json::from_str(json).unwrap();
    let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["KEY", "style", "children", "visible", "order"]);
    assert_eq!(record.children()[0].contents(), "x");
    assert_eq!(record.get("visible"), Some(&AttrValue::Bool(true)));
    assert_eq!(record.get("order"), Some(&AttrValue::Number(2.0)));

    let back = serde_json::to_string(&record).unwrap();
    let reparsed: ElementRecord = serde_json::from_str(&back).unwrap();
    assert_eq!(reparsed, record);
}

#[test]
fn test_json_rejects_duplicate_attributes() {
    let result: Result<ElementRecord, _> = serde_json::from_str(r#"{"KEY":"p","KEY":"button"}"#);
    assert!(result.is_err());
}
