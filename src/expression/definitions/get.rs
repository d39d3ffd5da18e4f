// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
};
use crate::types::{type_of, Type};
use crate::value::Value;
use crate::Rc;

use super::{operand_count, ParseFn};

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("get", Get::parse);
    m.insert("has", Has::parse);
}

fn parse_key(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Box<Expr>> {
    let [_, key] = args else {
        return ctx.error(format!(
            "Expected 1 argument, but found {} instead.",
            operand_count(args)
        ));
    };
    ctx.parse(key, 1, Some(&Type::String)).map(Box::new)
}

fn evaluate_key(key: &Expr, ctx: &EvaluationContext<'_>) -> Result<Rc<str>, EvaluationError> {
    match key.evaluate(ctx)? {
        Value::String(k) => Ok(k),
        other => Err(EvaluationError::InvalidPropertyKey {
            found: type_of(&other),
        }),
    }
}

/// Property of the current feature, `["get", key]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    key: Box<Expr>,
}

impl Get {
    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let key = parse_key(args, ctx)?;
        Some(Expr::Get(Self { key }))
    }
}

impl Expression for Get {
    fn ty(&self) -> &Type {
        &Type::Value
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        let key = evaluate_key(&self.key, ctx)?;
        Ok(ctx.property(&key))
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        f(self.key.as_ref())
    }

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        vec![PossibleOutput::Unknown]
    }
}

/// Whether the current feature has a property, `["has", key]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Has {
    key: Box<Expr>,
}

impl Has {
    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let key = parse_key(args, ctx)?;
        Some(Expr::Has(Self { key }))
    }
}

impl Expression for Has {
    fn ty(&self) -> &Type {
        &Type::Boolean
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        let key = evaluate_key(&self.key, ctx)?;
        Ok(Value::Bool(ctx.has_property(&key)))
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        f(self.key.as_ref())
    }

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        vec![PossibleOutput::Unknown]
    }
}
