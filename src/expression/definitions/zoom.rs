// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
};
use crate::types::Type;
use crate::value::Value;

use super::{operand_count, ParseFn};

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("zoom", Zoom::parse);
}

/// Current zoom level, `["zoom"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom;

impl Zoom {
    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        if args.len() != 1 {
            return ctx.error(format!(
                "Expected no arguments, but found {} instead.",
                operand_count(args)
            ));
        }
        Some(Expr::Zoom(Zoom))
    }
}

impl Expression for Zoom {
    fn ty(&self) -> &Type {
        &Type::Number
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        ctx.zoom()
            .map(Value::from)
            .ok_or(EvaluationError::MissingGlobal { name: "zoom" })
    }

    fn each_child(&self, _f: &mut dyn FnMut(&Expr)) {}

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        vec![PossibleOutput::Unknown]
    }
}
