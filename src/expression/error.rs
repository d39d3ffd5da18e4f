// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::Type;
use crate::value::Value;

use thiserror::Error;

/// Errors raised while evaluating a compiled expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Expected value to be of type {expected}, but found {found} instead.")]
    TypeMismatch { expected: Type, found: Type },

    #[error("Could not convert {value} to number.")]
    NumberConversion { value: Value },

    #[error("Could not parse color from value '{value}'")]
    ColorConversion { value: String },

    #[error("Property key must be a string, but found {found} instead.")]
    InvalidPropertyKey { found: Type },

    #[error("The '{name}' global is not available in this evaluation context.")]
    MissingGlobal { name: &'static str },
}

/// A compile error located at the operand path `key`, e.g. `[2][1]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{message}", location(.key))]
pub struct ParsingError {
    pub key: String,
    pub message: String,
}

fn location(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{key}: ")
    }
}

/// Every error recorded while compiling one expression. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join(.0))]
pub struct ParsingErrors(pub Vec<ParsingError>);

fn join(errors: &[ParsingError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ParsingErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ParsingError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
