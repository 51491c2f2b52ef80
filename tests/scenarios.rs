use rcjson::constants::MAX_DEPTH;
use rcjson::{ErrorKind, NonFinite, ParseOptions, SerializeOptions, Value};
use rstest::rstest;

#[rstest]
fn basic_parse() {
    let value = rcjson::parse(r#"{"a": 1, "b": [true, false, null]}"#).unwrap();
    assert_eq!(value.get_number("a"), 1.0);

    let b = value.get("b").unwrap();
    assert_eq!(b.len(), 3);
    let expected = Value::array();
    expected
        .push(Value::boolean(true))
        .unwrap()
        .push(Value::boolean(false))
        .unwrap()
        .push(Value::null())
        .unwrap();
    assert_eq!(b, expected);

    let reparsed = rcjson::parse(&rcjson::to_string(&value)).unwrap();
    assert_eq!(reparsed, value);
    let reparsed = rcjson::parse(&rcjson::to_string_pretty(&value)).unwrap();
    assert_eq!(reparsed, value);
}

#[rstest]
fn duplicate_keys_last_write_wins() {
    let value = rcjson::parse(r#"{"x":1,"x":2}"#).unwrap();
    assert_eq!(value.get("x").and_then(|x| x.as_f64()), Some(2.0));
    assert_eq!(value.len(), 1);
}

#[rstest]
fn surrogate_pair() {
    let value = rcjson::parse(r#""\uD83D\uDE00""#).unwrap();
    assert_eq!(value.as_str().unwrap().as_bytes(), [0xF0, 0x9F, 0x98, 0x80]);
}

#[rstest]
fn malformed_input() {
    let err = rcjson::parse(r#"{"a": }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.message(), "value expected");
    assert_eq!(err.to_string(), "line 1: value expected");
}

#[rstest]
fn nan_policy() {
    let value = Value::number(f64::NAN);
    assert_eq!(rcjson::to_string(&value), "null");
    let options = SerializeOptions::compact().with_non_finite(NonFinite::String);
    assert_eq!(rcjson::to_string_with_options(&value, &options), "\"NaN\"");
}

#[rstest]
#[case(SerializeOptions::compact())]
#[case(SerializeOptions::pretty())]
fn empty_composites(#[case] options: SerializeOptions) {
    assert_eq!(rcjson::to_string_with_options(&Value::object(), &options), "{}");
    assert_eq!(rcjson::to_string_with_options(&Value::array(), &options), "[]");
}

#[rstest]
fn array_boundaries() {
    let array = Value::array();
    array.push_number(1.0).unwrap();
    assert!(array.get_index(1).is_none());
    assert!(array.get_index(1000).is_none());

    let array = Value::array();
    array.reserve(4).unwrap();
    array.set_index(3, Value::string("last"));
    assert_eq!(rcjson::to_string(&array), r#"[null,null,null,"last"]"#);
}

#[rstest]
fn table_growth_preserves_entries() {
    let object = Value::object();
    // 8 slots double at 6, 12, 24, 48 and 96 members.
    for i in 0..100 {
        object.set_number(format!("k{i}"), i as f64).unwrap();
    }
    for i in (0..100).step_by(3) {
        object.set_number(format!("k{i}"), -(i as f64)).unwrap();
    }
    assert!(object.as_object().unwrap().capacity() >= 128);
    for i in 0..100 {
        let expected = if i % 3 == 0 { -(i as f64) } else { i as f64 };
        assert_eq!(object.get_number(&format!("k{i}")), expected);
    }
}

#[rstest]
fn comments_are_skipped() {
    let input = "/* config */\n{\n  // port\n  \"port\": 8080 /* inline */\n}";
    let value = rcjson::parse(input).unwrap();
    assert_eq!(value.get_number("port"), 8080.0);
}

#[rstest]
fn error_line_numbers_count_newlines() {
    let err = rcjson::parse("[\n1,\n2,\n]").unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.message(), "value expected");
}

#[rstest]
fn parse_from_missing_file_is_io_error() {
    let err = rcjson::parse_from("/definitely/not/here.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().starts_with("unable to read /definitely/not/here.json: "));
}

fn nested_arrays(levels: usize) -> Value {
    let mut value = Value::array();
    for _ in 1..levels {
        let outer = Value::array();
        outer.push(value).unwrap();
        value = outer;
    }
    value
}

#[rstest]
fn round_trip_holds_up_to_the_depth_limit() {
    let deep = nested_arrays(MAX_DEPTH);
    let reparsed = rcjson::parse(&rcjson::to_string(&deep)).unwrap();
    assert_eq!(reparsed, deep);
}

#[rstest]
fn one_level_past_the_depth_limit_needs_a_larger_bound() {
    let deep = nested_arrays(MAX_DEPTH + 1);
    let text = rcjson::to_string(&deep);
    let err = rcjson::parse(&text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.message(), "maximum nesting depth exceeded");

    let options = ParseOptions::default().with_max_depth(MAX_DEPTH + 1);
    let reparsed = rcjson::parse_with_options(text.as_bytes(), &options).unwrap();
    assert_eq!(reparsed, deep);
}
