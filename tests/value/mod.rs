// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::Result;
use styleexpr::*;

#[test]
fn serialize_number() -> Result<()> {
    // Check that integer values are serialized without fractional part
    assert_eq!(serde_json::to_string_pretty(&Value::from(1.0))?, "1");
    assert_eq!(serde_json::to_string_pretty(&Value::from(-1.0))?, "-1");

    // Ensure that fractional parts are also serialized.
    assert_eq!(serde_json::to_string_pretty(&Value::from(1.1))?, "1.1");
    assert_eq!(serde_json::to_string_pretty(&Value::from(-1.1))?, "-1.1");

    Ok(())
}

#[test]
fn serialize_string() -> Result<()> {
    assert_eq!(
        Value::String("Hello, World\n".into()).to_json_str()?,
        "\"Hello, World\\n\""
    );
    Ok(())
}

#[test]
fn serialize_color() -> Result<()> {
    let red = Value::from(Color::new(1.0, 0.0, 0.0, 0.5));
    assert_eq!(red.to_json_str()?, "\"rgba(255,0,0,0.5)\"");
    Ok(())
}

#[test]
fn constructors() -> Result<()> {
    assert_eq!(Value::new_object(), Value::from_json_str("{}")?);
    assert_eq!(Value::new_array(), Value::from_json_str("[]")?);
    assert!(Value::new_object().is_empty_object());
    Ok(())
}

#[test]
fn string_as_index() -> Result<()> {
    let obj = Value::from_json_str(r#"{ "a" : 5, "b" : 6 }"#)?;
    assert_eq!(&obj["a"], &Value::from(5.0));
    assert_eq!(&obj["c"], &Value::Null);
    assert_eq!(&Value::from(1.0)["a"], &Value::Null);
    Ok(())
}

#[test]
fn usize_as_index() -> Result<()> {
    assert_eq!(&Value::from_json_str("[1, 2, 3]")?[0], &Value::from(1.0));
    assert_eq!(&Value::from_json_str("[1, 2, 3]")?[5], &Value::Null);
    Ok(())
}

#[test]
fn api() -> Result<()> {
    assert!(&Value::from_json_str("{}")?.as_object()?.is_empty());
    let mut v = Value::new_object();
    v.as_object_mut()?.insert("a".into(), Value::from(3.145));
    assert_eq!(v["a"], Value::from(3.145));
    assert_eq!(v.as_object()?.len(), 1);

    let mut a = Value::new_array();
    a.as_array_mut()?.push(Value::from("x"));
    assert_eq!(a.as_array()?.len(), 1);

    // Check invalid api calls.
    assert!(Value::Null.as_object().is_err());
    assert!(Value::String("anc".into()).as_array().is_err());
    assert!(Value::String("anc".into()).as_array_mut().is_err());
    assert!(Value::new_object().as_number().is_err());
    assert!(Value::from(5.6).as_bool().is_err());
    assert!(Value::from(5.6).as_color().is_err());
    Ok(())
}

#[test]
fn runtime_types() -> Result<()> {
    assert_eq!(type_of(&Value::Null), Type::Null);
    assert_eq!(type_of(&Value::from("a")), Type::String);
    assert_eq!(
        type_of(&Value::from_json_str("[true, false]")?),
        Type::array(Type::Boolean, Some(2))
    );
    assert_eq!(type_of(&Value::from(Color::BLACK)), Type::Color);
    Ok(())
}
