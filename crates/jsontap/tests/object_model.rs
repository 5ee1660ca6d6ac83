#![allow(missing_docs)]
//! End-to-end runs of the value-model layer: builders, parsing back, and
//! pointer/patch editing over the resulting trees.

use jsontap::{
    ArrayBuilder, Error, Event, ObjectBuilder, Parser, PatchBuilder, Pointer, Value, parse,
};

fn build_person() -> Value {
    ObjectBuilder::new()
        .add("firstName", "John")
        .add("lastName", "Smith")
        .add("age", 25)
        .add(
            "address",
            ObjectBuilder::new()
                .add("streetAddress", "21 2nd Street")
                .add("city", "New York")
                .add("state", "NY")
                .add("postalCode", "10021"),
        )
        .add(
            "phoneNumber",
            ArrayBuilder::new()
                .add(
                    ObjectBuilder::new()
                        .add("type", "home")
                        .add("number", "212 555-1234"),
                )
                .add(
                    ObjectBuilder::new()
                        .add("type", "fax")
                        .add("number", "646 555-4567"),
                ),
        )
        .build()
}

#[test]
fn serialized_tree_reads_back_equal() {
    let original = build_person();
    let reread = parse(&original.to_string()).unwrap();
    assert_eq!(reread, original);
    assert_eq!(
        reread.get("lastName").and_then(Value::as_str),
        Some("Smith")
    );
}

// Ten single-entry objects: [{"key-0":0}, {"key-1":1}, .., {"key-9":9}].
fn build_keyed_array() -> Value {
    let mut builder = ArrayBuilder::new();
    for i in 0..10 {
        builder = builder.add(ObjectBuilder::new().add(format!("key-{i}"), i));
    }
    builder.build()
}

#[test]
fn pull_parse_the_keyed_array() {
    let text = build_keyed_array().to_string();
    let mut parser = Parser::new(&text);
    assert_eq!(parser.next_event().unwrap(), Event::StartArray);

    let mut object_count = 0;
    loop {
        match parser.next_event().unwrap() {
            Event::EndArray => break,
            Event::StartObject => {}
            other => panic!("expected an object, got {other:?}"),
        }
        assert!(matches!(parser.next_event().unwrap(), Event::Key(_)));
        assert!(parser.string().unwrap().starts_with("key-"));
        assert!(matches!(parser.next_event().unwrap(), Event::Number(_)));
        assert_eq!(parser.i64_value().unwrap(), object_count);
        assert_eq!(parser.next_event().unwrap(), Event::EndObject);
        object_count += 1;
    }
    assert_eq!(object_count, 10);
}

#[test]
fn pointer_into_the_keyed_array() {
    let doc = build_keyed_array();
    let pointer = Pointer::parse("/1/key-1").unwrap();
    let value = pointer.evaluate(&doc).unwrap();
    assert_eq!(value.as_number().and_then(jsontap::Number::as_i64), Some(1));
}

#[test]
fn patch_remove_from_the_keyed_array() {
    let doc = build_keyed_array();

    let result = PatchBuilder::new()
        .remove("/2/key-2")
        .build()
        .unwrap()
        .apply(&doc)
        .unwrap();

    // Element 2 is now an empty object; its siblings are untouched.
    assert_eq!(
        Pointer::parse("/2").unwrap().evaluate(&result).unwrap(),
        &parse("{}").unwrap()
    );

    let pointer = Pointer::parse("/2/key-2").unwrap();
    assert!(pointer.contains(&doc));
    assert!(!pointer.contains(&result));
    assert!(matches!(
        pointer.evaluate(&result),
        Err(Error::PathNotFound { .. })
    ));
}
