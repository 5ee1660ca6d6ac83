use rstest::rstest;

use crate::{Value, merge_patch, parse};

// The RFC 7396 appendix A test cases.
#[rstest]
#[case(r#"{"a":"b"}"#, r#"{"a":"c"}"#, r#"{"a":"c"}"#)]
#[case(r#"{"a":"b"}"#, r#"{"b":"c"}"#, r#"{"a":"b","b":"c"}"#)]
#[case(r#"{"a":"b"}"#, r#"{"a":null}"#, r#"{}"#)]
#[case(r#"{"a":"b","b":"c"}"#, r#"{"a":null}"#, r#"{"b":"c"}"#)]
#[case(r#"{"a":["b"]}"#, r#"{"a":"c"}"#, r#"{"a":"c"}"#)]
#[case(r#"{"a":"c"}"#, r#"{"a":["b"]}"#, r#"{"a":["b"]}"#)]
#[case(r#"{"a":{"b":"c"}}"#, r#"{"a":{"b":"d","c":null}}"#, r#"{"a":{"b":"d"}}"#)]
#[case(r#"{"a":[{"b":"c"}]}"#, r#"{"a":[1]}"#, r#"{"a":[1]}"#)]
#[case(r#"["a","b"]"#, r#"["c","d"]"#, r#"["c","d"]"#)]
#[case(r#"{"a":"b"}"#, r#"["c"]"#, r#"["c"]"#)]
#[case(r#"{"a":"foo"}"#, r#"null"#, r#"null"#)]
#[case(r#"{"a":"foo"}"#, r#""bar""#, r#""bar""#)]
#[case(r#"{"e":null}"#, r#"{"a":1}"#, r#"{"e":null,"a":1}"#)]
#[case(r#"[1,2]"#, r#"{"a":"b","c":null}"#, r#"{"a":"b"}"#)]
#[case(r#"{}"#, r#"{"a":{"bb":{"ccc":null}}}"#, r#"{"a":{"bb":{}}}"#)]
fn rfc_appendix_cases(#[case] target: &str, #[case] patch: &str, #[case] expected: &str) {
    let target = parse(target).unwrap();
    let patch = parse(patch).unwrap();
    assert_eq!(merge_patch(&target, &patch), parse(expected).unwrap());
}

#[test]
fn empty_patch_is_identity_for_objects() {
    let target = parse(r#"{"a": [1, {"b": null}], "c": "x"}"#).unwrap();
    assert_eq!(merge_patch(&target, &parse("{}").unwrap()), target);
}

#[test]
fn null_patch_replaces_anything() {
    for target in ["{}", "[1]", "42", "\"s\"", "null"] {
        let target = parse(target).unwrap();
        assert_eq!(merge_patch(&target, &Value::Null), Value::Null);
    }
}

#[test]
fn scalar_target_is_rebuilt_from_an_empty_object() {
    let merged = merge_patch(&parse("7").unwrap(), &parse(r#"{"a": 1}"#).unwrap());
    assert_eq!(merged, parse(r#"{"a": 1}"#).unwrap());
}

#[test]
fn removing_an_absent_key_is_harmless() {
    let target = parse(r#"{"a": 1}"#).unwrap();
    let patch = parse(r#"{"nosuch": null}"#).unwrap();
    assert_eq!(merge_patch(&target, &patch), target);
}

#[test]
fn merged_keys_keep_their_positions() {
    let target = parse(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
    let patch = parse(r#"{"b": 9, "d": 4}"#).unwrap();
    let merged = merge_patch(&target, &patch);
    assert_eq!(merged.to_string(), r#"{"a":1,"b":9,"c":3,"d":4}"#);
}

#[test]
fn target_is_not_mutated() {
    let target = parse(r#"{"a": {"b": 1}}"#).unwrap();
    let patch = parse(r#"{"a": {"b": null}}"#).unwrap();
    let _ = merge_patch(&target, &patch);
    assert_eq!(target, parse(r#"{"a": {"b": 1}}"#).unwrap());
}
