// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::color::Color;
use crate::Rc;

use core::fmt;
use std::collections::BTreeMap;
use std::ops;

use anyhow::{anyhow, Result};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

const F64_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

// Json data types plus colors, which style expressions produce at runtime.
// Objects only have string keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Color(Color),
    Array(Rc<Vec<Value>>),
    Object(Rc<BTreeMap<Rc<str>, Value>>),
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s.as_ref()),
            // Integral numbers are written without a fractional part.
            Value::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Array(a) => a.serialize(serializer),
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields.iter() {
                    map.serialize_entry(k.as_ref(), v)?;
                }
                map.end()
            }

            // display colors in css notation
            Value::Color(c) => serializer.serialize_str(&c.to_string()),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= F64_SAFE_INTEGER
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a json value")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v))
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(s))
    }

    fn visit_string<E>(self, s: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(s))
    }

    fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut arr = vec![];
        while let Some(v) = visitor.next_element()? {
            arr.push(v);
        }
        Ok(Value::from(arr))
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut map: BTreeMap<Rc<str>, Value> = BTreeMap::new();
        while let Some((key, value)) = visitor.next_entry::<String, Value>()? {
            map.insert(Rc::from(key), value);
        }
        Ok(Value::from(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            Err(_e) => Err(fmt::Error),
        }
    }
}

impl Value {
    pub fn new_object() -> Value {
        Value::from(BTreeMap::new())
    }

    pub fn new_array() -> Value {
        Value::from(vec![])
    }

    pub fn from_json_str(json: &str) -> Result<Value> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_str(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(Rc::new(a))
    }
}

impl From<BTreeMap<Rc<str>, Value>> for Value {
    fn from(m: BTreeMap<Rc<str>, Value>) -> Self {
        Value::Object(Rc::new(m))
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_empty_object(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_empty())
    }

    pub fn as_bool(&self) -> Result<&bool> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(anyhow!("not a bool")),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(anyhow!("not a number")),
        }
    }

    pub fn as_string(&self) -> Result<&Rc<str>> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(anyhow!("not a string")),
        }
    }

    pub fn as_color(&self) -> Result<&Color> {
        match self {
            Value::Color(c) => Ok(c),
            _ => Err(anyhow!("not a color")),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(anyhow!("not an array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Ok(Rc::make_mut(a)),
            _ => Err(anyhow!("not an array")),
        }
    }

    pub fn as_object(&self) -> Result<&BTreeMap<Rc<str>, Value>> {
        match self {
            Value::Object(m) => Ok(m),
            _ => Err(anyhow!("not an object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut BTreeMap<Rc<str>, Value>> {
        match self {
            Value::Object(m) => Ok(Rc::make_mut(m)),
            _ => Err(anyhow!("not an object")),
        }
    }
}

impl ops::Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Value::Array(a) => a.get(index).unwrap_or(&Value::Null),
            _ => &Value::Null,
        }
    }
}

impl ops::Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Value::Object(o) => o.get(key).unwrap_or(&Value::Null),
            _ => &Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn integral_numbers_serialize_without_fraction() -> Result<()> {
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(-3.0).to_string(), "-3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        Ok(())
    }

    #[test]
    fn indexing_missing_entries_yields_null() -> Result<()> {
        let v = Value::from_json_str(r#"{"a": [1, {"b": true}]}"#)?;
        assert_eq!(v["a"][1]["b"], Value::Bool(true));
        assert_eq!(v["a"][7], Value::Null);
        assert_eq!(v["missing"]["deeper"], Value::Null);
        assert_eq!(Value::from(3.0)["a"], Value::Null);
        Ok(())
    }

    #[test]
    fn object_keys_are_kept_sorted() -> Result<()> {
        let mut v = Value::new_object();
        v.as_object_mut()?.insert("b".into(), Value::from(2.0));
        v.as_object_mut()?.insert("a".into(), Value::Null);
        assert_eq!(v.to_string(), r#"{"a":null,"b":2}"#);
        Ok(())
    }
}
