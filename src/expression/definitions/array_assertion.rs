// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
    TypeWrapper,
};
use crate::types::{check_subtype, type_of, Type};
use crate::value::Value;

use super::{operand_count, ParseFn};

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("array", ArrayAssertion::parse);
}

/// Asserts that its input is an array, optionally of a given item type and
/// length: `["array", input]`, `["array", item, input]` or
/// `["array", item, length, input]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAssertion {
    ty: Type,
    pub(crate) input: Box<Expr>,
    inferred: bool,
}

impl ArrayAssertion {
    pub fn new(ty: Type, input: Expr, inferred: bool) -> Self {
        Self {
            ty,
            input: Box::new(input),
            inferred,
        }
    }

    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let (item_type, length, input) = match args {
            [_, input] => (Type::Value, None, input),
            [_, item, input] => (Self::parse_item_type(item, ctx)?, None, input),
            [_, item, length, input] => {
                let item_type = Self::parse_item_type(item, ctx)?;
                let length = match length {
                    Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => *n as usize,
                    _ => {
                        return ctx.error_at(
                            2,
                            "The length argument to \"array\" must be a positive integer literal.",
                        )
                    }
                };
                (item_type, Some(length), input)
            }
            _ => {
                return ctx.error(format!(
                    "Expected 1, 2, or 3 arguments, but found {} instead.",
                    operand_count(args)
                ))
            }
        };

        let index = operand_count(args);
        let input = ctx.parse(input, index, Some(&Type::Value))?;
        Some(Expr::ArrayAssertion(Self::new(
            Type::array(item_type, length),
            input,
            false,
        )))
    }

    fn parse_item_type(item: &Value, ctx: &mut ParsingContext<'_>) -> Option<Type> {
        match item {
            Value::String(s) if matches!(s.as_ref(), "string" | "number" | "boolean") => {
                Type::from_kind(s)
            }
            _ => ctx.error_at(
                1,
                "The item type argument of \"array\" must be one of string, number, boolean",
            ),
        }
    }
}

impl TypeWrapper for ArrayAssertion {
    fn input(&self) -> &Expr {
        &self.input
    }

    fn inferred(&self) -> bool {
        self.inferred
    }
}

impl Expression for ArrayAssertion {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        let value = self.input.evaluate(ctx)?;
        let found = type_of(&value);
        match check_subtype(&self.ty, &found) {
            Ok(()) => Ok(value),
            Err(_) => Err(EvaluationError::TypeMismatch {
                expected: self.ty.clone(),
                found,
            }),
        }
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        f(self.input.as_ref())
    }

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        self.input.possible_outputs()
    }
}
