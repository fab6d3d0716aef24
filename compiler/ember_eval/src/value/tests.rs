use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn number_to_string_matches_script_formatting() {
    let cases = [
        (0.0, "0"),
        (-0.0, "0"),
        (1.0, "1"),
        (-42.0, "-42"),
        (0.1, "0.1"),
        (123.456, "123.456"),
        (1e21, "1e+21"),
        (1.5e300, "1.5e+300"),
        (1e-6, "0.000001"),
        (1e-7, "1e-7"),
        (2.5e-8, "2.5e-8"),
        (100.0, "100"),
        (f64::NAN, "NaN"),
        (f64::INFINITY, "Infinity"),
        (f64::NEG_INFINITY, "-Infinity"),
    ];
    for (n, expected) in cases {
        assert_eq!(number_to_string(n), expected, "formatting {n:?}");
    }
}

#[test]
fn string_to_number_accepts_numeric_literals_only() {
    assert_eq!(string_to_number(""), 0.0);
    assert_eq!(string_to_number("  \n"), 0.0);
    assert_eq!(string_to_number(" 42 "), 42.0);
    assert_eq!(string_to_number("-1.5"), -1.5);
    assert_eq!(string_to_number("1e3"), 1000.0);
    assert_eq!(string_to_number(".5"), 0.5);
    assert_eq!(string_to_number("0x1f"), 31.0);
    assert_eq!(string_to_number("0b101"), 5.0);
    assert_eq!(string_to_number("0o17"), 15.0);
    assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    for bad in ["12abc", "0x", "0xZ", "1_000", "abc", "infinity", "--1"] {
        assert!(string_to_number(bad).is_nan(), "{bad:?} should be NaN");
    }
}

#[test]
fn int32_conversions_wrap() {
    assert_eq!(to_int32(4_294_967_301.0), 5);
    assert_eq!(to_int32(2_147_483_648.0), -2_147_483_648);
    assert_eq!(to_int32(-1.0), -1);
    assert_eq!(to_int32(3.9), 3);
    assert_eq!(to_int32(f64::NAN), 0);
    assert_eq!(to_uint32(-1.0), 4_294_967_295);
    assert_eq!(to_uint32(f64::INFINITY), 0);
}

#[test]
fn array_index_is_canonical() {
    assert_eq!(array_index("0"), Some(0));
    assert_eq!(array_index("17"), Some(17));
    assert_eq!(array_index("01"), None);
    assert_eq!(array_index("-1"), None);
    assert_eq!(array_index("1.5"), None);
    assert_eq!(array_index("4294967295"), None);
    assert_eq!(array_index("length"), None);
}

#[test]
fn truthiness() {
    assert!(!Value::Undefined.is_truthy());
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::Number(-0.0).is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(Value::from("false").is_truthy());
    assert!(Value::empty_object().is_truthy());
    assert!(Value::array(Vec::new()).is_truthy());
}

#[test]
fn loose_equality_coerces() {
    let t = |a: Value, b: Value| a.loose_equals(&b);
    assert!(t(Value::Null, Value::Undefined));
    assert!(!t(Value::Null, Value::Number(0.0)));
    assert!(t(Value::Number(1.0), Value::from("1")));
    assert!(t(Value::Bool(true), Value::from("1")));
    assert!(t(Value::Bool(false), Value::Number(0.0)));
    assert!(t(Value::array(vec![Value::Number(1.0), Value::Number(2.0)]), Value::from("1,2")));
    assert!(t(Value::array(Vec::new()), Value::Number(0.0)));
    assert!(!t(Value::Number(f64::NAN), Value::Number(f64::NAN)));
    assert!(!t(Value::empty_object(), Value::empty_object()));
}

#[test]
fn strict_equality_is_identity_for_references() {
    let obj = Value::empty_object();
    assert!(obj.strict_equals(&obj.clone()));
    assert!(!obj.strict_equals(&Value::empty_object()));
    assert!(!Value::Number(1.0).strict_equals(&Value::from("1")));
    assert!(Value::Number(0.0).strict_equals(&Value::Number(-0.0)));
}

#[test]
fn to_string_of_containers() {
    let nested = Value::array(vec![
        Value::Number(1.0),
        Value::Null,
        Value::array(vec![Value::from("a"), Value::Undefined]),
    ]);
    assert_eq!(&*nested.to_js_string(), "1,,a,");
    assert_eq!(&*Value::empty_object().to_js_string(), "[object Object]");
    assert_eq!(Value::from("7").to_number(), 7.0);
    assert!(Value::empty_object().to_number().is_nan());
}

#[test]
fn cyclic_array_joins_without_recursing_forever() {
    let arr = Value::array(vec![Value::Number(1.0)]);
    if let Value::Array(items) = &arr {
        items.borrow_mut().push(arr.clone());
    }
    assert_eq!(&*arr.to_js_string(), "1,");
    assert_eq!(inspect(&arr), "[ 1, [Circular] ]");
}

fn nested_arrays(depth: usize) -> Value {
    let mut value = Value::array(Vec::new());
    for _ in 0..depth {
        value = Value::array(vec![value]);
    }
    value
}

#[test]
fn deeply_nested_array_converts_without_overflowing() {
    let nested = nested_arrays(100_000);
    assert_eq!(&*nested.to_js_string(), "");
    assert!(nested.loose_equals(&Value::from("")));
    assert_eq!(nested.to_number(), 0.0);

    let mut tail = Value::array(vec![Value::Number(7.0)]);
    for _ in 0..100_000 {
        tail = Value::array(vec![tail]);
    }
    assert_eq!(&*tail.to_js_string(), "7");
}

#[test]
fn long_chains_are_released_iteratively() {
    let mut list = Value::Null;
    for i in 0..200_000 {
        let mut node = ObjectMap::default();
        node.insert("value".to_string(), Value::Number(f64::from(i)));
        node.insert("next".to_string(), list);
        list = Value::object(node);
    }
    drop(list);

    drop(nested_arrays(200_000));
}

#[test]
fn release_keeps_shared_children() {
    let shared = Value::array(vec![Value::Number(1.0)]);
    let mut parent = ObjectMap::default();
    parent.insert("child".to_string(), shared.clone());
    drop(Value::object(parent));

    let Value::Array(items) = &shared else {
        panic!("expected an array");
    };
    assert_eq!(items.borrow().len(), 1);
    assert_eq!(items.handle_count(), 1);
}

#[test]
fn type_of_and_type_name() {
    assert_eq!(Value::Null.type_of(), "object");
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::array(Vec::new()).type_of(), "object");
    let f = Value::function(FunctionValue::native("f", 0, |_| Ok(Value::Undefined)));
    assert_eq!(f.type_of(), "function");
    assert!(f.is_callable());
}

#[test]
fn inspect_formats_like_a_console() {
    let mut inner = ObjectMap::default();
    inner.insert("deep".to_string(), Value::array(vec![Value::array(vec![Value::Number(1.0)])]));
    let mut outer = ObjectMap::default();
    outer.insert("s".to_string(), Value::from("it's"));
    outer.insert("n".to_string(), Value::Number(-0.0));
    outer.insert("my-key".to_string(), Value::Bool(true));
    outer.insert("inner".to_string(), Value::object(inner));

    assert_eq!(
        inspect(&Value::object(outer)),
        "{ s: 'it\\'s', n: -0, 'my-key': true, inner: { deep: [ [Array] ] } }"
    );
    assert_eq!(inspect(&Value::from("x")), "'x'");
    assert_eq!(format_log_line(&[Value::from("x"), Value::from("y")]), "x y");
}

#[test]
fn shared_references_see_mutation() {
    let arr = Value::array(Vec::new());
    let alias = arr.clone();
    if let Value::Array(items) = &alias {
        items.borrow_mut().push(Value::Number(1.0));
    }
    assert_eq!(&*arr.to_js_string(), "1");
    assert_eq!(arr, alias);
    let s: Rc<str> = Rc::from("abc");
    assert_eq!(Value::Str(s.clone()), Value::string(s));
}
