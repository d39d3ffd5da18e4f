// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
};
use crate::types::Type;
use crate::value::Value;

use tracing::trace;

use super::ParseFn;

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("coalesce", Coalesce::parse);
}

/// Evaluates its operands in order and yields the first non-null result.
#[derive(Debug, Clone, PartialEq)]
pub struct Coalesce {
    ty: Type,
    args: Vec<Expr>,
}

impl Coalesce {
    pub fn new(ty: Type, args: Vec<Expr>) -> Self {
        Self { ty, args }
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let Some(operands) = args.get(1..).filter(|ops| !ops.is_empty()) else {
            return ctx.error("Expected at least one argument.");
        };

        let mut output_type = ctx.expected_type().filter(|t| t.is_concrete()).cloned();
        let mut parsed_args = Vec::with_capacity(operands.len());
        let mut needs_outer_annotation = false;

        for (index, operand) in operands.iter().enumerate() {
            let parsed = ctx.parse_nullable(operand, index + 1, output_type.as_ref())?;

            // Null operands say nothing about the type of the others.
            if output_type.is_none() && *parsed.ty() != Type::Null {
                output_type = Some(parsed.ty().clone());
            }

            // An inferred assertion would fail on a null operand before the
            // coalesce had a chance to move on to the next one. Drop it and
            // check the type of the whole expression instead.
            let parsed = match parsed.strip_inferred_wrapper() {
                Ok(input) => {
                    trace!(key = %ctx.key(), index = index + 1, "removed inferred wrapper");
                    needs_outer_annotation = true;
                    input
                }
                Err(parsed) => parsed,
            };

            parsed_args.push(parsed);
        }

        let output_type = output_type.unwrap_or(Type::Null);
        if needs_outer_annotation {
            let node = Expr::Coalesce(Self::new(Type::Value, parsed_args));
            Some(ctx.annotate_type(output_type, node))
        } else {
            Some(Expr::Coalesce(Self::new(output_type, parsed_args)))
        }
    }
}

impl Expression for Coalesce {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        for arg in &self.args {
            let value = arg.evaluate(ctx)?;
            if !value.is_null() {
                return Ok(value);
            }
        }
        Ok(Value::Null)
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        for arg in &self.args {
            f(arg);
        }
    }

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        self.args
            .iter()
            .flat_map(|arg| arg.possible_outputs())
            .collect()
    }
}
