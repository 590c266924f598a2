use super::*;
use serde_json::json;

#[test]
fn default_is_null() {
    assert!(Value::default().is_null());
    assert_eq!(Value::default().tag(), ValueTag::Null);
}

#[test]
fn numeric_classification_follows_tags() {
    assert!(Value::Int8(1).is_numeric());
    assert!(Value::Uint64(1).is_numeric());
    assert!(Value::Float32(1.0).is_numeric());
    assert!(!Value::Bool(true).is_numeric());
    assert!(!Value::from("1").is_numeric());
    assert!(!Value::Null.is_numeric());
}

#[test]
fn options_and_vectors_convert_structurally() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some(4_u16)), Value::Uint16(4));
    assert_eq!(
        Value::from(vec!["a", "b"]),
        Value::List(vec![Value::from("a"), Value::from("b")])
    );
}

#[test]
fn map_builder_orders_keys() {
    let value = Value::map([("b", Value::Int32(2)), ("a", Value::Int32(1))]);
    let Value::Map(entries) = value else {
        panic!("expected a map");
    };

    assert_eq!(entries.keys().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn json_numbers_pick_the_narrowest_wide_type() {
    assert_eq!(Value::from(json!(-3)), Value::Int64(-3));
    assert_eq!(Value::from(json!(u64::MAX)), Value::Uint64(u64::MAX));
    assert_eq!(Value::from(json!(0.5)), Value::Float64(0.5));
}

#[test]
fn json_documents_project_recursively() {
    let value = Value::from(&json!({
        "name": "ada",
        "tags": ["x", null],
        "active": true,
    }));

    assert_eq!(
        value,
        Value::map([
            ("active", Value::Bool(true)),
            ("name", Value::from("ada")),
            ("tags", Value::List(vec![Value::from("x"), Value::Null])),
        ])
    );
}

#[test]
fn text_accessor_only_matches_text() {
    assert_eq!(Value::from("hi").as_text(), Some("hi"));
    assert_eq!(Value::Char('h').as_text(), None);
}

#[test]
fn tag_labels_are_stable() {
    assert_eq!(Value::Uint32(1).tag().to_string(), ValueTag::Uint32.label());
    assert_eq!(Value::List(vec![]).tag(), ValueTag::List);
}

#[test]
fn exact_conversion_keeps_the_number() {
    assert_eq!(Value::Int64(42).to_exact::<i32>(), Some(42));
    assert_eq!(Value::Int64(7).to_exact::<u64>(), Some(7));
    assert_eq!(Value::Uint64(10).to_exact::<f64>(), Some(10.0));
    assert_eq!(Value::Float64(3.0).to_exact::<u8>(), Some(3));
    assert_eq!(Value::Float64(0.25).to_exact::<f32>(), Some(0.25));

    assert_eq!(Value::Int64(-1).to_exact::<u64>(), None);
    assert_eq!(Value::Int64(300).to_exact::<i8>(), None);
    assert_eq!(Value::Float64(1.5).to_exact::<i32>(), None);
    assert_eq!(Value::Float64(0.1).to_exact::<f32>(), None);
    assert_eq!(Value::Int64(i64::MAX).to_exact::<f64>(), None);
    assert_eq!(Value::from("42").to_exact::<i32>(), None);
}

#[test]
fn fits_only_numeric_tags() {
    assert!(Value::Uint64(255).fits(ValueTag::Uint8));
    assert!(!Value::Uint64(256).fits(ValueTag::Uint8));
    assert!(Value::Int32(-5).fits(ValueTag::Float32));
    assert!(!Value::Int32(1).fits(ValueTag::Bool));
    assert!(!Value::Bool(true).fits(ValueTag::Int32));
}

#[test]
fn serde_round_trip_preserves_variants() {
    let value = Value::map([
        ("id", Value::Uint64(u64::MAX)),
        ("ratio", Value::Float32(0.5)),
        ("initial", Value::Char('a')),
        ("tags", Value::List(vec![Value::from("x"), Value::Null])),
        ("small", Value::Int8(-3)),
    ]);

    let encoded = serde_json::to_string(&value).unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, value);
}
