// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::{check_subtype, type_of, Type};
use crate::value::Value;

use super::definitions::{ArrayAssertion, Assertion, Coercion, Literal, DEFINITIONS};
use super::error::ParsingError;
use super::{Expr, Expression};

use tracing::trace;

/// State threaded through the compilation of one expression.
///
/// A context is created for every operand position. Children share the
/// error list of the root context, so errors are never lost when a nested
/// parse fails.
pub struct ParsingContext<'a> {
    key: String,
    expected_type: Option<Type>,
    // Whether a null typed expression satisfies `expected_type`.
    nullable: bool,
    errors: &'a mut Vec<ParsingError>,
}

impl<'a> ParsingContext<'a> {
    pub fn new(errors: &'a mut Vec<ParsingError>, expected_type: Option<Type>) -> Self {
        Self {
            key: String::new(),
            expected_type,
            nullable: false,
            errors,
        }
    }

    /// Path of the operand being parsed, e.g. `[1][2]`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Type required of the expression at this position, if any.
    pub fn expected_type(&self) -> Option<&Type> {
        self.expected_type.as_ref()
    }

    /// Parse the operand at `index` of the current expression.
    ///
    /// Returns `None` on failure; the error has already been recorded and the
    /// caller is expected to give up as well.
    pub fn parse(&mut self, raw: &Value, index: usize, expected: Option<&Type>) -> Option<Expr> {
        self.parse_child(raw, index, expected, false)
    }

    /// Like [`ParsingContext::parse`], but a null literal is accepted
    /// whatever type is expected.
    pub fn parse_nullable(
        &mut self,
        raw: &Value,
        index: usize,
        expected: Option<&Type>,
    ) -> Option<Expr> {
        self.parse_child(raw, index, expected, true)
    }

    fn parse_child(
        &mut self,
        raw: &Value,
        index: usize,
        expected: Option<&Type>,
        nullable: bool,
    ) -> Option<Expr> {
        let mut child = ParsingContext {
            key: format!("{}[{index}]", self.key),
            expected_type: expected.cloned(),
            nullable,
            errors: &mut *self.errors,
        };
        child.parse_expression(raw)
    }

    /// Parse `raw` at the position this context describes.
    pub fn parse_expression(&mut self, raw: &Value) -> Option<Expr> {
        let parsed = match raw {
            Value::Array(items) => {
                let Some(op) = items.first() else {
                    return self.error(
                        "Expected an array with at least one element. If you wanted a literal array, use [\"literal\", []].",
                    );
                };
                let Value::String(op) = op else {
                    return self.error(format!(
                        "Expression name must be a string, but found {} instead. If you wanted a literal array, use [\"literal\", [...]].",
                        type_of(op)
                    ));
                };
                match DEFINITIONS.get(op.as_ref()) {
                    Some(parse) => parse(items.as_slice(), self)?,
                    None => {
                        return self.error_at(
                            0,
                            format!("Unknown expression \"{op}\". If you wanted a literal array, use [\"literal\", [...]]."),
                        )
                    }
                }
            }
            Value::Object(_) => {
                return self.error("Bare objects invalid. Use [\"literal\", {...}] instead.")
            }
            _ => Expr::Literal(Literal::new(raw.clone(), self.expected_type())),
        };

        self.enforce_expected_type(parsed)
    }

    // Wraps `parsed` so that it produces the expected type at runtime, then
    // checks the result against the expectation.
    fn enforce_expected_type(&mut self, parsed: Expr) -> Option<Expr> {
        let Some(expected) = self.expected_type.clone() else {
            return Some(parsed);
        };

        let actual = parsed.ty().clone();
        let parsed = match (&expected, &actual) {
            (Type::String | Type::Number | Type::Boolean | Type::Object, Type::Value) => {
                trace!(key = %self.key, %expected, "inferring assertion");
                Expr::Assertion(Assertion::new(expected.clone(), parsed, true))
            }
            (Type::Array { .. }, Type::Value) => {
                trace!(key = %self.key, %expected, "inferring array assertion");
                Expr::ArrayAssertion(ArrayAssertion::new(expected.clone(), parsed, true))
            }
            (Type::Color, Type::Value | Type::String) => {
                trace!(key = %self.key, "inferring color coercion");
                Expr::Coercion(Coercion::new(Type::Color, parsed, true))
            }
            _ => parsed,
        };

        if self.nullable && *parsed.ty() == Type::Null {
            return Some(parsed);
        }

        match check_subtype(&expected, parsed.ty()) {
            Ok(()) => Some(parsed),
            Err(message) => self.error(message),
        }
    }

    /// Wrap `expr` in an explicit annotation of type `ty`.
    ///
    /// Unlike inferred wrappers, the annotation is never removed by an
    /// enclosing expression.
    pub fn annotate_type(&self, ty: Type, expr: Expr) -> Expr {
        match ty {
            Type::Value => expr,
            Type::Color => Expr::Coercion(Coercion::new(ty, expr, false)),
            Type::Array { .. } => Expr::ArrayAssertion(ArrayAssertion::new(ty, expr, false)),
            _ => Expr::Assertion(Assertion::new(ty, expr, false)),
        }
    }

    /// Record an error at the current position.
    pub fn error<T>(&mut self, message: impl Into<String>) -> Option<T> {
        self.errors.push(ParsingError {
            key: self.key.clone(),
            message: message.into(),
        });
        None
    }

    /// Record an error against operand `index` of the current expression.
    pub fn error_at<T>(&mut self, index: usize, message: impl Into<String>) -> Option<T> {
        self.errors.push(ParsingError {
            key: format!("{}[{index}]", self.key),
            message: message.into(),
        });
        None
    }
}
