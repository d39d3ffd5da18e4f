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
    m.insert("string", Assertion::parse);
    m.insert("number", Assertion::parse);
    m.insert("boolean", Assertion::parse);
    m.insert("object", Assertion::parse);
}

/// Fails evaluation unless its input produces a value of the asserted type.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    ty: Type,
    pub(crate) input: Box<Expr>,
    inferred: bool,
}

impl Assertion {
    pub fn new(ty: Type, input: Expr, inferred: bool) -> Self {
        Self {
            ty,
            input: Box::new(input),
            inferred,
        }
    }

    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let ty = match args.first() {
            Some(Value::String(name)) => match name.as_ref() {
                "string" => Type::String,
                "number" => Type::Number,
                "boolean" => Type::Boolean,
                "object" => Type::Object,
                _ => return ctx.error(format!("Unknown type assertion \"{name}\".")),
            },
            _ => return ctx.error("Expected a type assertion name."),
        };

        let [_, input] = args else {
            return ctx.error(format!(
                "Expected 1 argument, but found {} instead.",
                operand_count(args)
            ));
        };
        let input = ctx.parse(input, 1, Some(&Type::Value))?;
        Some(Expr::Assertion(Self::new(ty, input, false)))
    }
}

impl TypeWrapper for Assertion {
    fn input(&self) -> &Expr {
        &self.input
    }

    fn inferred(&self) -> bool {
        self.inferred
    }
}

impl Expression for Assertion {
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
