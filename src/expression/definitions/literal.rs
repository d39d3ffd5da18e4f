// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
};
use crate::types::{type_of, Type};
use crate::value::Value;

use super::{operand_count, ParseFn};

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("literal", Literal::parse);
}

/// Constant value, written either bare or as `["literal", value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    ty: Type,
    value: Value,
}

impl Literal {
    pub fn new(value: Value, expected: Option<&Type>) -> Self {
        // An empty array takes on the array type expected of it.
        let ty = match (type_of(&value), expected) {
            (
                Type::Array {
                    length: Some(0), ..
                },
                Some(
                    expected @ Type::Array {
                        length: None | Some(0),
                        ..
                    },
                ),
            ) => expected.clone(),
            (ty, _) => ty,
        };

        Self { ty, value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let [_, value] = args else {
            return ctx.error(format!(
                "'literal' expression requires exactly one argument, but found {} instead.",
                operand_count(args)
            ));
        };
        Some(Expr::Literal(Self::new(value.clone(), ctx.expected_type())))
    }
}

impl Expression for Literal {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        Ok(self.value.clone())
    }

    fn each_child(&self, _f: &mut dyn FnMut(&Expr)) {}

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        vec![PossibleOutput::Known(self.value.clone())]
    }
}
