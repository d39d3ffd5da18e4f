// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;

use core::fmt;

/// Static type of an expression.
///
/// `Value` is the universal type: an expression of type `Value` may produce
/// any runtime value and places no constraint on the position it is parsed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Null,
    Number,
    String,
    Boolean,
    Color,
    Object,
    Value,

    // Homogenous arrays, optionally of a fixed length.
    Array {
        item_type: Box<Type>,
        length: Option<usize>,
    },
}

impl Type {
    pub fn array(item_type: Type, length: Option<usize>) -> Self {
        Type::Array {
            item_type: Box::new(item_type),
            length,
        }
    }

    /// Name of the kind of this type, without array parameters.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Number => "number",
            Type::String => "string",
            Type::Boolean => "boolean",
            Type::Color => "color",
            Type::Object => "object",
            Type::Value => "value",
            Type::Array { .. } => "array",
        }
    }

    /// Whether an expected type of this kind constrains parsing.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Type::Value)
    }

    /// Parse a type name as used in property specifications.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Some(match kind {
            "null" => Type::Null,
            "number" => Type::Number,
            "string" => Type::String,
            "boolean" => Type::Boolean,
            "color" => Type::Color,
            "object" => Type::Object,
            "value" => Type::Value,
            "array" => Type::array(Type::Value, None),
            _ => return None,
        })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Array { item_type, length } => match (item_type.as_ref(), length) {
                (Type::Value, None) => write!(f, "array"),
                (item, None) => write!(f, "array<{item}>"),
                (item, Some(n)) => write!(f, "array<{item}, {n}>"),
            },
            _ => write!(f, "{}", self.kind()),
        }
    }
}

// Every type a `Value` typed expression may resolve to.
const VALUE_MEMBER_KINDS: [Type; 6] = [
    Type::Null,
    Type::Number,
    Type::String,
    Type::Boolean,
    Type::Color,
    Type::Object,
];

/// Check that a value of type `actual` may be used where `expected` is required.
///
/// Returns a description of the mismatch on failure.
pub fn check_subtype(expected: &Type, actual: &Type) -> Result<(), String> {
    let compatible = match (expected, actual) {
        (
            Type::Array {
                item_type: expected_item,
                length: expected_length,
            },
            Type::Array {
                item_type: actual_item,
                length: actual_length,
            },
        ) => {
            // An empty array literal fits any array type.
            let empty = *actual_length == Some(0) && **actual_item == Type::Value;
            (empty || check_subtype(expected_item, actual_item).is_ok())
                && (expected_length.is_none() || expected_length == actual_length)
        }
        (Type::Value, Type::Array { .. }) => true,
        (Type::Value, _) => VALUE_MEMBER_KINDS.contains(actual) || *actual == Type::Value,
        _ => expected == actual,
    };

    if compatible {
        Ok(())
    } else {
        Err(format!("Expected {expected} but found {actual} instead."))
    }
}

/// Runtime type of a value.
///
/// Arrays whose elements all share one type report that item type; mixed
/// arrays report `value` items.
pub fn type_of(value: &Value) -> Type {
    match value {
        Value::Null => Type::Null,
        Value::Bool(_) => Type::Boolean,
        Value::Number(_) => Type::Number,
        Value::String(_) => Type::String,
        Value::Color(_) => Type::Color,
        Value::Object(_) => Type::Object,
        Value::Array(items) => {
            let mut item_type: Option<Type> = None;
            for item in items.iter() {
                let t = type_of(item);
                match &item_type {
                    None => item_type = Some(t),
                    Some(prev) if *prev == t => {}
                    Some(_) => {
                        item_type = Some(Type::Value);
                        break;
                    }
                }
            }
            Type::array(item_type.unwrap_or(Type::Value), Some(items.len()))
        }
    }
}
