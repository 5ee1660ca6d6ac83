use crate::{ArrayBuilder, Error, Generator, ObjectBuilder, Value, parse};

#[test]
fn empty_array_document() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_array().unwrap().write_end().unwrap();
    g.close().unwrap();
    assert_eq!(out, "[]");
}

#[test]
fn output_is_written_incrementally() {
    let mut out = String::new();
    {
        let mut g = Generator::new(&mut out);
        g.write_start_array().unwrap();
        g.write(1).unwrap();
        g.write(2).unwrap();
        // No write_end, no close: the text so far is already in the sink.
    }
    assert_eq!(out, "[1,2");
}

#[test]
fn object_with_fields() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_object().unwrap();
    g.write_field("name", "Vinc").unwrap();
    g.write_field("age", 37).unwrap();
    g.write_key("tags").unwrap();
    g.write_start_array().unwrap();
    g.write("a").unwrap();
    g.write_end().unwrap();
    g.write_end().unwrap();
    g.close().unwrap();
    assert_eq!(out, r#"{"name":"Vinc","age":37,"tags":["a"]}"#);
}

#[test]
fn whole_value_trees_stream_through() {
    let value = ObjectBuilder::new()
        .add("xs", ArrayBuilder::new().add(1).add(Value::Null).add(true))
        .build();
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_value(&value).unwrap();
    g.close().unwrap();
    assert_eq!(out, r#"{"xs":[1,null,true]}"#);
}

#[test]
fn null_and_scalars_at_top_level() {
    for (value, expected) in [
        (Value::Null, "null"),
        (Value::from(false), "false"),
        (Value::from(-3), "-3"),
        (Value::from("x\ny"), "\"x\\ny\""),
    ] {
        let mut out = String::new();
        let mut g = Generator::new(&mut out);
        g.write(value).unwrap();
        g.close().unwrap();
        assert_eq!(out, expected);
    }
}

#[test]
fn strings_are_escaped() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write("q\" b\\ s/ \u{8}\u{c}\n\r\t \u{1} é😀").unwrap();
    g.close().unwrap();
    assert_eq!(out, "\"q\\\" b\\\\ s/ \\b\\f\\n\\r\\t \\u0001 é😀\"");
}

#[test]
fn key_outside_object_is_structural() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    assert!(matches!(
        g.write_key("k"),
        Err(Error::Structural { .. })
    ));

    let mut g = Generator::new(&mut out);
    g.write_start_array().unwrap();
    assert!(matches!(
        g.write_key("k"),
        Err(Error::Structural { .. })
    ));
}

#[test]
fn value_in_object_requires_key() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_object().unwrap();
    assert!(matches!(g.write(1), Err(Error::Structural { .. })));
}

#[test]
fn second_key_before_value_is_structural() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_object().unwrap();
    g.write_key("a").unwrap();
    assert!(matches!(
        g.write_key("b"),
        Err(Error::Structural { .. })
    ));
}

#[test]
fn end_with_pending_key_is_structural() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_object().unwrap();
    g.write_key("a").unwrap();
    assert!(matches!(g.write_end(), Err(Error::Structural { .. })));
}

#[test]
fn end_without_container_is_structural() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write(1).unwrap();
    assert!(matches!(g.write_end(), Err(Error::Structural { .. })));
}

#[test]
fn second_top_level_value_is_structural() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write(1).unwrap();
    assert!(matches!(g.write(2), Err(Error::Structural { .. })));
}

#[test]
fn close_with_open_containers_is_incomplete() {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_array().unwrap().write_start_object().unwrap();
    assert!(matches!(
        g.close(),
        Err(Error::IncompleteDocument { .. })
    ));
}

#[test]
fn close_without_any_write_is_incomplete() {
    let mut g = Generator::new(String::new());
    assert!(matches!(
        g.close(),
        Err(Error::IncompleteDocument { .. })
    ));
}

#[test]
fn writes_after_close_are_structural() {
    let mut g = Generator::new(String::new());
    g.write(1).unwrap();
    g.close().unwrap();
    assert!(matches!(g.write(2), Err(Error::Structural { .. })));
    assert_eq!(g.into_inner(), "1");
}

#[test]
fn generated_text_is_valid_json_for_an_independent_parser() {
    let value = ObjectBuilder::new()
        .add("name", "Alice")
        .add(
            "scores",
            ArrayBuilder::new()
                .add(1)
                .add(Value::try_from(2.5).unwrap())
                .add(-3),
        )
        .add("nested", ObjectBuilder::new().add("ok", true).add("none", Value::Null))
        .build();
    let text = value.to_string();
    let oracle: serde_json::Value = serde_json::from_str(&text).expect("oracle must accept it");
    assert_eq!(oracle["name"], "Alice");
    assert_eq!(oracle["nested"]["ok"], true);

    // And our own parser agrees with what we wrote.
    assert_eq!(parse(&text).unwrap(), value);
}
