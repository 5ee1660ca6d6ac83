#![allow(missing_docs)]
//! End-to-end runs of the streaming layer: generate a document, then pull
//! the same event sequence back out of it.

use jsontap::{Error, Event, Generator, Parser};

fn build_empty_array() -> String {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_array().unwrap().write_end().unwrap();
    g.close().unwrap();
    out
}

#[test]
fn build_empty_array_document() {
    assert_eq!(build_empty_array(), "[]");
}

#[test]
fn parse_empty_array_document() {
    let text = build_empty_array();
    let mut parser = Parser::new(&text);
    assert_eq!(parser.next_event().unwrap(), Event::StartArray);
    assert_eq!(parser.next_event().unwrap(), Event::EndArray);
    assert_eq!(parser.next_event(), Err(Error::NoMoreEvents));
}

const PEOPLE: [(&str, &str); 3] = [
    ("Vinc", "1988-11-20"),
    ("Paul", "1991-09-04"),
    ("Alice", "1995-09-08"),
];

fn build_people_array() -> String {
    let mut out = String::new();
    let mut g = Generator::new(&mut out);
    g.write_start_array().unwrap();
    for (name, birth_date) in PEOPLE {
        g.write_start_object()
            .unwrap()
            .write_field("name", name)
            .unwrap()
            .write_field("birthDate", birth_date)
            .unwrap()
            .write_end()
            .unwrap();
    }
    g.write_end().unwrap();
    g.close().unwrap();
    out
}

#[test]
fn build_people_array_document() {
    let text = build_people_array();
    assert!(text.starts_with('[') && text.ends_with(']'));
}

#[test]
fn walk_people_array_events() {
    let text = build_people_array();
    let mut parser = Parser::new(&text);
    assert_eq!(parser.next_event().unwrap(), Event::StartArray);

    let mut object_count = 0;
    loop {
        match parser.next_event().unwrap() {
            Event::EndArray => break,
            Event::StartObject => {}
            other => panic!("expected an object, got {other:?}"),
        }

        assert_eq!(
            parser.next_event().unwrap(),
            Event::Key("name".to_string())
        );
        assert_eq!(parser.string().unwrap(), "name");
        assert!(matches!(parser.next_event().unwrap(), Event::String(_)));
        let name = parser.string().unwrap().to_string();

        assert_eq!(
            parser.next_event().unwrap(),
            Event::Key("birthDate".to_string())
        );
        assert!(matches!(parser.next_event().unwrap(), Event::String(_)));
        let birth_date = parser.string().unwrap().to_string();

        assert_eq!(parser.next_event().unwrap(), Event::EndObject);
        assert_eq!((name.as_str(), birth_date.as_str()), PEOPLE[object_count]);

        object_count += 1;
        assert!(object_count <= PEOPLE.len());
    }

    assert_eq!(object_count, PEOPLE.len());
    assert!(!parser.has_next());
}
