use super::{eval, runtime_error};
use crate::{RuntimeError, Value};

#[test]
fn test_array_indexing_in_order() {
    let source = "let xs = [10, 20, 30];";
    assert_eq!(eval(&format!("{source} xs[0]")), Value::Number(10));
    assert_eq!(eval(&format!("{source} xs[1]")), Value::Number(20));
    assert_eq!(eval(&format!("{source} xs[2]")), Value::Number(30));
    assert_eq!(eval(&format!("{source} xs[1 + 1]")), Value::Number(30));
}

#[test]
fn test_array_index_out_of_bounds() {
    match runtime_error("let xs = [10, 20, 30]; xs[3]") {
        RuntimeError::IndexOutOfBounds { index, length, .. } => {
            assert_eq!(index, 3);
            assert_eq!(length, 3);
        }
        other => panic!("Expected IndexOutOfBounds, got: {other:?}"),
    }

    match runtime_error("let xs = [10, 20, 30]; xs[0 - 1]") {
        RuntimeError::IndexOutOfBounds { index, .. } => assert_eq!(index, -1),
        other => panic!("Expected IndexOutOfBounds, got: {other:?}"),
    }

    assert!(matches!(
        runtime_error("[][0]"),
        RuntimeError::IndexOutOfBounds { .. }
    ));
}

#[test]
fn test_array_index_must_be_number() {
    assert!(matches!(
        runtime_error("let xs = [1]; xs[\"0\"]"),
        RuntimeError::TypeError { .. }
    ));
}

#[test]
fn test_array_requires_computed_access() {
    assert!(matches!(
        runtime_error("let xs = [1]; xs.length"),
        RuntimeError::InvalidProperty { .. }
    ));
}

#[test]
fn test_nested_arrays() {
    assert_eq!(eval("[[1, 2], [3, 4]][1][0]"), Value::Number(3));
}

#[test]
fn test_object_member_access() {
    let source = "let point = { x: 1, y: 2 };";
    assert_eq!(eval(&format!("{source} point.x")), Value::Number(1));
    assert_eq!(eval(&format!("{source} point[\"y\"]")), Value::Number(2));
}

#[test]
fn test_object_shorthand_looks_up_variable() {
    assert_eq!(
        eval("let name = \"ember\"; let o = { name }; o.name"),
        Value::string("ember")
    );
    assert!(matches!(
        runtime_error("{ missing }"),
        RuntimeError::UnresolvedName { .. }
    ));
}

#[test]
fn test_object_later_duplicates_overwrite() {
    let value = eval("{ a: 1, b: 2, a: 3 }");
    match value {
        Value::Object(entries) => {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["a", "b"]);
            assert_eq!(entries.get("a"), Some(&Value::Number(3)));
        }
        other => panic!("Expected object, got: {other:?}"),
    }
}

#[test]
fn test_missing_property() {
    match runtime_error("let o = { a: 1 }; o.b") {
        RuntimeError::PropertyNotFound { property, .. } => assert_eq!(property, "b"),
        other => panic!("Expected PropertyNotFound, got: {other:?}"),
    }
}

#[test]
fn test_computed_object_key_must_be_string() {
    assert!(matches!(
        runtime_error("let o = { a: 1 }; o[1]"),
        RuntimeError::TypeError { .. }
    ));
}

#[test]
fn test_dot_property_must_be_identifier() {
    assert!(matches!(
        runtime_error("let o = { a: 1 }; o.1"),
        RuntimeError::InvalidProperty { .. }
    ));
}

#[test]
fn test_member_access_on_scalars() {
    match runtime_error("let n = 1; n.x") {
        RuntimeError::NotIndexable { found, .. } => assert_eq!(found, "number"),
        other => panic!("Expected NotIndexable, got: {other:?}"),
    }
    assert!(matches!(
        runtime_error("\"abc\"[0]"),
        RuntimeError::NotIndexable { .. }
    ));
}

#[test]
fn test_nested_object_access() {
    let source = "let config = { server: { port: 8080 } }; config.server.port";
    assert_eq!(eval(source), Value::Number(8080));
}

#[test]
fn test_collections_are_values() {
    let source = "
        let a = [1, 2];
        let b = a;
        a = [3];
        b[1]
    ";
    assert_eq!(eval(source), Value::Number(2));
}
