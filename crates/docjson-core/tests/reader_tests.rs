use docjson_core::{
    parse_str, EscapeMode, JsonArray, JsonError, JsonObject, JsonReader, Number, TypedAccess,
    Value,
};

/// Helper: read the first document in `text`, which must exist.
fn read(text: &str) -> Value {
    JsonReader::new(text.as_bytes())
        .read()
        .expect("read failed")
        .expect("no document")
}

fn read_verbatim(text: &str) -> Value {
    JsonReader::with_escape_mode(text.as_bytes(), EscapeMode::Verbatim)
        .read()
        .expect("read failed")
        .expect("no document")
}

fn assert_malformed(text: &str) {
    match JsonReader::new(text.as_bytes()).read() {
        Err(JsonError::Malformed { .. }) => {}
        other => panic!("expected Malformed for {text:?}, got {other:?}"),
    }
}

// ============================================================================
// Top-level documents
// ============================================================================

#[test]
fn read_empty_object() {
    assert_eq!(read("{}"), Value::Object(JsonObject::new()));
}

#[test]
fn read_empty_array() {
    assert_eq!(read("[]"), Value::Array(JsonArray::new()));
}

#[test]
fn read_skips_leading_whitespace() {
    let v = read(" \n\t {\"a\":1}");
    assert_eq!(v.as_object().unwrap().get_int("a").unwrap(), 1);
}

#[test]
fn read_empty_input_is_no_document() {
    let mut reader = JsonReader::new("".as_bytes());
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn read_bare_scalar_is_no_document() {
    for text in ["42", "\"str\"", "true", "null"] {
        let mut reader = JsonReader::new(text.as_bytes());
        assert!(reader.read().unwrap().is_none(), "{text} should not be a document");
    }
}

#[test]
fn read_consecutive_documents() {
    let mut reader = JsonReader::new(r#"{"a":1} [2] {"b":3}"#.as_bytes());
    assert!(reader.read().unwrap().unwrap().as_object().is_some());
    assert!(reader.read().unwrap().unwrap().as_array().is_some());
    assert_eq!(reader.read_object().unwrap().get_int("b").unwrap(), 3);
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn read_object_rejects_array() {
    let err = JsonReader::new("[1]".as_bytes()).read_object().unwrap_err();
    match err {
        JsonError::TypeMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "$");
            assert_eq!(expected, "object");
            assert_eq!(found, "array");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn read_array_without_document_is_malformed() {
    let err = JsonReader::new("   ".as_bytes()).read_array().unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn parse_str_requires_a_document() {
    assert!(parse_str("7").unwrap_err().is_malformed());
    assert!(parse_str("[7]").is_ok());
}

#[test]
fn from_str_for_containers() {
    let obj: JsonObject = r#"{"k":"v"}"#.parse().unwrap();
    assert_eq!(obj.get_string("k").unwrap(), "v");
    let arr: JsonArray = "[1,2]".parse().unwrap();
    assert_eq!(arr.len(), 2);
    let v: Value = "[]".parse().unwrap();
    assert!(v.is_empty());
}

#[test]
fn into_inner_returns_stream() {
    let input: &[u8] = b"{}";
    let mut reader = JsonReader::new(input);
    reader.read().unwrap();
    let rest = reader.into_inner();
    assert!(rest.is_empty());
}

// ============================================================================
// Nesting and terminator ownership
// ============================================================================

#[test]
fn nested_object_does_not_close_outer() {
    let obj = read(r#"{"a":{"b":1},"c":2}"#);
    let obj = obj.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().collect();
    assert_eq!(keys, vec!["a", "c"]);
    assert_eq!(obj.get_object("a").unwrap().get_int("b").unwrap(), 1);
    assert_eq!(obj.get_int("c").unwrap(), 2);
}

#[test]
fn nested_array_does_not_close_outer() {
    let obj = read(r#"{"a":[1,[2,3]],"b":{"c":[]},"d":true}"#);
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    let a = obj.get_array("a").unwrap();
    assert_eq!(a.get_array(1).unwrap().get_int(1).unwrap(), 3);
    assert!(obj.get_object("b").unwrap().get_array("c").unwrap().is_empty());
    assert!(obj.get_bool("d").unwrap());
}

#[test]
fn scalar_before_closing_brace() {
    let obj = read(r#"{"x":{"y":null}}"#);
    let inner = obj.as_object().unwrap().get_object("x").unwrap();
    assert!(inner.opt("y").unwrap().is_null());
}

#[test]
fn deeply_nested_arrays() {
    let text = format!("{}{}", "[".repeat(100), "]".repeat(100));
    let mut v = &read(&text);
    let mut depth = 1;
    while let Some(arr) = v.as_array() {
        match arr.opt(0) {
            Some(inner) => {
                v = inner;
                depth += 1;
            }
            None => break,
        }
    }
    assert_eq!(depth, 100);
}

#[test]
fn nesting_past_limit_is_malformed() {
    let text = "[".repeat(docjson_core::reader::MAX_DEPTH + 1);
    assert_malformed(&text);

    let closed = format!(
        "{}{}",
        "[".repeat(docjson_core::reader::MAX_DEPTH + 1),
        "]".repeat(docjson_core::reader::MAX_DEPTH + 1)
    );
    assert_malformed(&closed);
}

#[test]
fn nesting_at_limit_reads_and_writes() {
    let depth = docjson_core::reader::MAX_DEPTH;
    let arrays = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let v = read(&arrays);
    assert_eq!(v.to_json_string(), arrays);

    let objects = format!("{}1{}", "{\"a\":".repeat(depth), "}".repeat(depth));
    let v = read(&objects);
    let written = v.to_json_string();
    assert_eq!(written, objects);
    assert_eq!(parse_str(&written).unwrap(), v);
}

#[test]
fn objects_in_array() {
    let arr = read(r#"[{"a":1},{"a":2},{}]"#);
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.get_object(1).unwrap().get_int("a").unwrap(), 2);
    assert!(arr.get_object(2).unwrap().is_empty());
}

// ============================================================================
// Lenient structure
// ============================================================================

#[test]
fn whitespace_everywhere() {
    let v = read("{ \"a\" : [ 1 , 2 ] ,\n \"b\" : \"x\" }");
    let obj = v.as_object().unwrap();
    assert_eq!(obj.get_array("a").unwrap().len(), 2);
    assert_eq!(obj.get_string("b").unwrap(), "x");
}

#[test]
fn separators_are_skipped() {
    let arr = read("[,1,,2,]");
    assert_eq!(arr.to_json_string(), "[1,2]");
    let obj = read(r#"{,"a":1,,"b":2,}"#);
    assert_eq!(obj.to_json_string(), r#"{"a":1,"b":2}"#);
}

#[test]
fn colon_is_optional() {
    let obj = read(r#"{"a" 1}"#);
    assert_eq!(obj.as_object().unwrap().get_int("a").unwrap(), 1);
}

#[test]
fn literals_are_case_insensitive() {
    let arr = read("[TRUE,False,NULL]");
    assert_eq!(
        arr,
        Value::Array(vec![Value::Bool(true), Value::Bool(false), Value::Null].into())
    );
}

#[test]
fn duplicate_keys_keep_first_position_last_value() {
    let obj = read(r#"{"a":1,"b":2,"a":3}"#);
    assert_eq!(obj.to_json_string(), r#"{"a":3,"b":2}"#);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn small_integers_are_int() {
    let arr = read("[0,5,-7,2147483647,-2147483648]");
    let numbers: Vec<Number> = arr.as_array().unwrap().iter().filter_map(Value::as_number).collect();
    assert_eq!(
        numbers,
        vec![
            Number::Int(0),
            Number::Int(5),
            Number::Int(-7),
            Number::Int(i32::MAX),
            Number::Int(i32::MIN),
        ]
    );
}

#[test]
fn large_integers_are_long() {
    let arr = read("[5000000000,2147483648,-9223372036854775808]");
    let numbers: Vec<Number> = arr.as_array().unwrap().iter().filter_map(Value::as_number).collect();
    assert_eq!(
        numbers,
        vec![
            Number::Long(5_000_000_000),
            Number::Long(2_147_483_648),
            Number::Long(i64::MIN),
        ]
    );
}

#[test]
fn fractions_are_double() {
    let arr = read("[3.25,-0.5,1.5e2,2.5E-1]");
    let numbers: Vec<Number> = arr.as_array().unwrap().iter().filter_map(Value::as_number).collect();
    assert_eq!(
        numbers,
        vec![
            Number::Double(3.25),
            Number::Double(-0.5),
            Number::Int(150),
            Number::Double(0.25),
        ]
    );
}

#[test]
fn integral_fraction_text_narrows() {
    let obj = read(r#"{"a":1.0,"b":1e3,"c":1e10}"#);
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.opt("a"), Some(&Value::Number(Number::Int(1))));
    assert_eq!(obj.opt("b"), Some(&Value::Number(Number::Int(1000))));
    assert_eq!(obj.opt("c"), Some(&Value::Number(Number::Long(10_000_000_000))));
}

#[test]
fn integer_beyond_long_is_double() {
    let arr = read("[18446744073709551616]");
    assert_eq!(
        arr.as_array().unwrap().opt(0),
        Some(&Value::Number(Number::Double(18_446_744_073_709_551_616.0)))
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn standard_escapes_are_decoded() {
    let arr = read(r#"["a\"b","c\\d","e\/f","\b\f\n\r\t"]"#);
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.get_string(0).unwrap(), "a\"b");
    assert_eq!(arr.get_string(1).unwrap(), "c\\d");
    assert_eq!(arr.get_string(2).unwrap(), "e/f");
    assert_eq!(arr.get_string(3).unwrap(), "\u{8}\u{c}\n\r\t");
}

#[test]
fn unicode_escapes_are_decoded() {
    let arr = read(r#"["caf\u00e9","\ud83d\ude00","\u0041"]"#);
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.get_string(0).unwrap(), "café");
    assert_eq!(arr.get_string(1).unwrap(), "😀");
    assert_eq!(arr.get_string(2).unwrap(), "A");
}

#[test]
fn raw_utf8_is_preserved() {
    let obj = read(r#"{"名前":"你好","emoji":"🦀"}"#);
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.get_string("名前").unwrap(), "你好");
    assert_eq!(obj.get_string("emoji").unwrap(), "🦀");
}

#[test]
fn structural_characters_inside_strings() {
    let obj = read(r#"{"a":"},]{[,:","b":1}"#);
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.get_string("a").unwrap(), "},]{[,:");
    assert_eq!(obj.get_int("b").unwrap(), 1);
}

#[test]
fn verbatim_mode_keeps_backslashes() {
    let arr = read_verbatim(r#"["a\"b","c\\d","\n"]"#);
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.get_string(0).unwrap(), r#"a\"b"#);
    assert_eq!(arr.get_string(1).unwrap(), r#"c\\d"#);
    assert_eq!(arr.get_string(2).unwrap(), r#"\n"#);
}

#[test]
fn lone_surrogate_is_malformed() {
    assert_malformed(r#"["\uD83D"]"#);
    assert_malformed(r#"["\uDE00"]"#);
}

#[test]
fn invalid_escape_is_malformed() {
    assert_malformed(r#"["\x"]"#);
    assert_malformed(r#"["\u12G4"]"#);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn missing_value_is_malformed() {
    assert_malformed(r#"{"a":}"#);
}

#[test]
fn unterminated_array_is_malformed_at_eof() {
    let err = JsonReader::new("[1,2".as_bytes()).read().unwrap_err();
    match err {
        JsonError::Malformed { message, .. } => {
            assert!(message.contains("end of input"), "message was {message:?}");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn unterminated_object_is_malformed() {
    assert_malformed(r#"{"a":1"#);
    assert_malformed(r#"{"a""#);
    assert_malformed("{");
}

#[test]
fn unterminated_string_is_malformed() {
    assert_malformed(r#"["abc"#);
}

#[test]
fn unquoted_key_is_malformed() {
    assert_malformed("{a:1}");
}

#[test]
fn bad_literals_are_malformed() {
    assert_malformed("[tru]");
    assert_malformed("[nulls]");
    assert_malformed("[falsey]");
}

#[test]
fn bad_numbers_are_malformed() {
    for text in ["[1.]", "[.5]", "[+1]", "[1e]", "[0x10]", "[12abc]", "[NaN]", "[1e400]"] {
        assert_malformed(text);
    }
}

#[test]
fn invalid_utf8_is_malformed() {
    let bytes: &[u8] = b"[\"\xff\"]";
    let err = JsonReader::new(bytes).read().unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn error_reports_position() {
    let err = JsonReader::new("[1,\n  2,\n  @]".as_bytes()).read().unwrap_err();
    match err {
        JsonError::Malformed { line, column, .. } => {
            assert_eq!((line, column), (3, 3));
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn io_errors_surface_as_io() {
    struct Failing;
    impl std::io::Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }
    let err = JsonReader::new(Failing).read().unwrap_err();
    assert!(matches!(err, JsonError::Io(_)));
}
